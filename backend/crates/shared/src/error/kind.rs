//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum shared by every client-side error type.

use serde::Serialize;

/// エラー種別の列挙体
///
/// バックエンドが返す HTTP ステータスコード、またはクライアント側で
/// 発生した失敗を、画面表示用の分類にまとめます。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::from_status_code(403);
/// assert_eq!(kind, ErrorKind::Forbidden);
/// assert_eq!(kind.as_str(), "Forbidden");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - Bad Request: リクエストが不正
    BadRequest,
    /// 401 - Unauthorized: セッションが無効、再ログインが必要
    Unauthorized,
    /// 403 - Forbidden: アクセス権限なし、または CSRF トークン不正
    Forbidden,
    /// 404 - Not Found: リソースが見つからない
    NotFound,
    /// 408 - Request Timeout: 通信がタイムアウトした
    RequestTimeout,
    /// 409 - Conflict: 現在の状態と競合
    Conflict,
    /// 422 - Unprocessable Entity: 入力値の検証エラー
    UnprocessableEntity,
    /// 429 - Too Many Requests: レート制限超過
    TooManyRequests,
    /// 500 - Internal Server Error: サーバー内部エラー、またはクライアント内部の不整合
    InternalServerError,
    /// 502 - Bad Gateway: バックエンドから解釈できない応答が返った
    BadGateway,
    /// 503 - Service Unavailable: バックエンドに接続できない
    ServiceUnavailable,
}

impl ErrorKind {
    /// HTTP ステータスコードを取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
    /// assert_eq!(ErrorKind::BadGateway.status_code(), 502);
    /// ```
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::RequestTimeout => 408,
            ErrorKind::Conflict => 409,
            ErrorKind::UnprocessableEntity => 422,
            ErrorKind::TooManyRequests => 429,
            ErrorKind::InternalServerError => 500,
            ErrorKind::BadGateway => 502,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// バックエンドのステータスコードから分類を決定
    ///
    /// 個別に対応していない 4xx は [`ErrorKind::BadRequest`]、
    /// それ以外は [`ErrorKind::InternalServerError`] に丸めます。
    pub const fn from_status_code(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            408 => ErrorKind::RequestTimeout,
            409 => ErrorKind::Conflict,
            422 => ErrorKind::UnprocessableEntity,
            429 => ErrorKind::TooManyRequests,
            502 => ErrorKind::BadGateway,
            503 | 504 => ErrorKind::ServiceUnavailable,
            400..=499 => ErrorKind::BadRequest,
            _ => ErrorKind::InternalServerError,
        }
    }

    /// ユーザー向けの文字列表現を取得
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::RequestTimeout => "Request Timeout",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::BadGateway => "Bad Gateway",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// サーバー側（または通信経路）のエラーかどうか
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// ユーザーの操作で解決できるエラーかどうか
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_code_known() {
        assert_eq!(ErrorKind::from_status_code(401), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status_code(403), ErrorKind::Forbidden);
        assert_eq!(ErrorKind::from_status_code(422), ErrorKind::UnprocessableEntity);
        assert_eq!(ErrorKind::from_status_code(504), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_from_status_code_fallbacks() {
        assert_eq!(ErrorKind::from_status_code(418), ErrorKind::BadRequest);
        assert_eq!(ErrorKind::from_status_code(599), ErrorKind::InternalServerError);
        assert_eq!(ErrorKind::from_status_code(200), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_status_code_matches_classification() {
        for kind in [
            ErrorKind::BadRequest,
            ErrorKind::Unauthorized,
            ErrorKind::Forbidden,
            ErrorKind::NotFound,
            ErrorKind::Conflict,
            ErrorKind::UnprocessableEntity,
            ErrorKind::TooManyRequests,
            ErrorKind::BadGateway,
            ErrorKind::ServiceUnavailable,
        ] {
            assert_eq!(ErrorKind::from_status_code(kind.status_code()), kind);
        }
    }

    #[test]
    fn test_server_and_client_errors() {
        assert!(ErrorKind::Forbidden.is_client_error());
        assert!(!ErrorKind::Forbidden.is_server_error());
        assert!(ErrorKind::BadGateway.is_server_error());
        assert!(!ErrorKind::ServiceUnavailable.is_client_error());
    }
}
