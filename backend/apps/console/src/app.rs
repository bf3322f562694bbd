//! Console wiring
//!
//! Builds one client stack per process and runs a single command against it.

use std::sync::Arc;
use std::time::Duration;

use auth::application::sign_in::{SignInInput, SignInUseCase};
use auth::models::AuthenticatedUser;
use auth::{AuthConfig, AuthError, HttpAuthGateway, SessionContext};
use kernel::error::app_error::{AppError, ResultExt};
use kernel::error::kind::ErrorKind;
use kernel::id::Id;
use platform::navigation::TracingNavigator;
use platform::notice::TracingNotifier;
use platform::password::evaluate_password;
use platform::query_cache::QueryCache;
use platform::{ApiClient, ClientConfig, CsrfTokenCache};
use roster::{
    ListQuery, Page, Player, Recruit, Resource, ResourceClient, RosterConfig, ScheduleEvent,
    ScoutingReport, Team,
};
use serde::Serialize;

use crate::cli::{Cli, Command, GetArgs, ListArgs, ResourceKind};

pub struct App {
    client: ApiClient,
    csrf: CsrfTokenCache,
    queries: QueryCache,
    gateway: Arc<HttpAuthGateway>,
    session: SessionContext<HttpAuthGateway>,
    roster_config: Arc<RosterConfig>,
}

impl App {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config = ClientConfig {
            request_timeout: Duration::from_secs(cli.timeout_secs),
            ..ClientConfig::with_base_url(&cli.api_url)?
        };

        let csrf = CsrfTokenCache::new();
        let queries = QueryCache::new();
        let client = ApiClient::new(config, csrf.clone(), Arc::new(TracingNavigator))?;

        let auth_config = Arc::new(AuthConfig::default());
        let gateway = Arc::new(HttpAuthGateway::new(client.clone(), auth_config.clone()));
        let session = SessionContext::new(
            gateway.clone(),
            csrf.clone(),
            queries.clone(),
            Arc::new(TracingNotifier),
            auth_config,
        );
        session.bind_unauthorized(&client);
        session.subscribe(|state| tracing::debug!(status = %state.status(), "Session state"));

        Ok(Self {
            client,
            csrf,
            queries,
            gateway,
            session,
            // One-shot process, nothing to reuse
            roster_config: Arc::new(RosterConfig::uncached()),
        })
    }

    pub async fn run(&self, cli: &Cli) -> Result<(), AppError> {
        match &cli.command {
            Command::Password { candidate } => {
                print_password(candidate);
                Ok(())
            }
            Command::Whoami => {
                self.establish(cli).await?;
                match self.session.current_user() {
                    Some(user) => print_user(&user),
                    None => println!("Not signed in"),
                }
                Ok(())
            }
            Command::Login => {
                let (email, password) = cli.credentials().ok_or_else(|| {
                    AppError::unauthorized("Email and password are required")
                        .with_action("Pass --email and --password or set SIDELINE_EMAIL / SIDELINE_PASSWORD")
                })?;
                let user = self.sign_in(email, password).await?;
                print_user(&user);
                Ok(())
            }
            Command::Logout => {
                self.establish(cli).await?;
                self.session.logout().await;
                Ok(())
            }
            Command::List(args) => {
                self.establish(cli).await?;
                self.list(args).await
            }
            Command::Get(args) => {
                self.establish(cli).await?;
                self.get(args).await
            }
        }
    }

    /// Sign in when credentials were given, otherwise reuse whatever session exists
    async fn establish(&self, cli: &Cli) -> Result<(), AppError> {
        match cli.credentials() {
            Some((email, password)) => self.sign_in(email, password).await.map(|_| ()),
            None => {
                self.session.mount().await;
                Ok(())
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AppError> {
        let use_case =
            SignInUseCase::new(self.gateway.clone(), self.session.clone(), self.csrf.clone());
        use_case
            .execute(SignInInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .map_err(AuthError::into_app_error)
    }

    async fn list(&self, args: &ListArgs) -> Result<(), AppError> {
        let mut query = ListQuery::new();
        query.page = args.page;
        query.limit = args.limit;
        query.search = args.search.clone();

        match args.resource {
            ResourceKind::Players => self.print_page::<Player>(&query).await,
            ResourceKind::Teams => self.print_page::<Team>(&query).await,
            ResourceKind::Recruits => self.print_page::<Recruit>(&query).await,
            ResourceKind::Reports => self.print_page::<ScoutingReport>(&query).await,
            ResourceKind::Schedule => self.print_page::<ScheduleEvent>(&query).await,
        }
    }

    async fn get(&self, args: &GetArgs) -> Result<(), AppError> {
        match args.resource {
            ResourceKind::Players => self.print_record::<Player>(&args.id).await,
            ResourceKind::Teams => self.print_record::<Team>(&args.id).await,
            ResourceKind::Recruits => self.print_record::<Recruit>(&args.id).await,
            ResourceKind::Reports => self.print_record::<ScoutingReport>(&args.id).await,
            ResourceKind::Schedule => self.print_record::<ScheduleEvent>(&args.id).await,
        }
    }

    fn resources<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient::new(
            self.client.clone(),
            self.queries.clone(),
            self.roster_config.clone(),
        )
    }

    async fn print_record<R: Resource>(&self, raw_id: &str) -> Result<(), AppError> {
        let id: Id<R::Marker> = raw_id
            .parse()
            .map_app_err(ErrorKind::BadRequest, format!("Invalid {} id", R::NAME))?;
        let record = self
            .resources::<R>()
            .get(id)
            .await
            .map_err(roster::RosterError::into_app_error)?;
        let body = serde_json::to_string_pretty(&record)
            .map_app_err(ErrorKind::InternalServerError, "Could not render record")?;
        println!("{}", body);
        Ok(())
    }

    async fn print_page<R: Resource>(&self, query: &ListQuery) -> Result<(), AppError> {
        let page = self
            .resources::<R>()
            .list(query)
            .await
            .map_err(roster::RosterError::into_app_error)?;
        println!("{}", render_page(&page)?);
        Ok(())
    }
}

fn render_page<R: Serialize>(page: &Page<R>) -> Result<String, AppError> {
    let summary = match page.pagination {
        Some(p) => format!("page {} of {} ({} total)", p.page, p.total_pages.max(1), p.total),
        None => format!("{} records", page.len()),
    };
    let body = serde_json::to_string_pretty(&page.items)
        .map_app_err(ErrorKind::InternalServerError, "Could not render records")?;
    Ok(format!("{}\n{}", body, summary))
}

fn print_user(user: &AuthenticatedUser) {
    println!("{} ({}, id {})", user.display_name(), user.role, user.id);
    if user.is_head_coach() {
        println!("Head coach privileges");
    }
}

fn print_password(candidate: &str) {
    let Some(strength) = evaluate_password(Some(candidate)) else {
        return;
    };
    println!("{} ({}/5)", strength.label(), strength.score());
    for (requirement, met) in strength.requirements().iter() {
        println!("  [{}] {}", if met { "x" } else { " " }, requirement.description());
    }
}
