//! hub-console: Dealer Hub operator console
//!
//! One command per invocation: build the session and API client, check the
//! route guard, drive the matching view, print its state and any alerts.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use hub_client::{
    ApiClient, NetworkHttpClient, Session, SessionHandle, SessionStore, UserInfo,
};
use hub_console::form::{DiscountForm, DiscountScope};
use hub_console::guard::{self, Route};
use hub_console::views::{
    CalculationInput, DealerDetailView, DealerDiscountsView, DealerQuery, DiscountCalculateView,
    DiscountListView, ExpiredDiscountsView, ProductDetailView, ProductDiscountsView, ProductQuery,
    RoleListView, UpcomingDiscountsView, ViewContext,
};
use hub_console::{Alerts, ConsoleConfig, ViewState, logger, render};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::AppError;
use shared::models::DiscountType;
use shared::types::EntityId;

#[derive(Parser)]
#[command(name = "hub-console")]
#[command(about = "Dealer Hub operator console")]
struct Cli {
    /// Backend API base URL
    #[arg(long, global = true, env = "HUB_API_URL")]
    api_url: Option<String>,
    /// Session file
    #[arg(long, global = true, env = "HUB_SESSION_FILE")]
    session_file: Option<PathBuf>,
    /// Page size for paged lists
    #[arg(long, global = true, env = "HUB_PAGE_SIZE")]
    page_size: Option<u32>,
    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    /// Log as line-delimited JSON
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Discounts {
        #[command(subcommand)]
        command: DiscountCommand,
    },
    Dealers {
        #[command(subcommand)]
        command: DealerCommand,
    },
    Products {
        #[command(subcommand)]
        command: ProductCommand,
    },
    Roles {
        #[command(subcommand)]
        command: RoleCommand,
    },
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
}

#[derive(Subcommand)]
enum DiscountCommand {
    /// Paged discount list
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Search discounts (at least 2 characters)
    Search {
        query: String,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Active discounts of a dealer
    ByDealer {
        dealer_id: EntityId,
        /// Merge upcoming discounts targeting the dealer
        #[arg(long)]
        include_upcoming: bool,
    },
    /// Active discounts of a product
    ByProduct {
        product_id: EntityId,
        #[arg(long)]
        dealer: Option<EntityId>,
        #[arg(long)]
        include_upcoming: bool,
    },
    Expired,
    Upcoming,
    Show {
        id: EntityId,
    },
    Create(FormArgs),
    /// Replace a discount; unspecified fields keep their current value
    Update {
        id: EntityId,
        #[command(flatten)]
        form: FormArgs,
    },
    Delete {
        id: EntityId,
        /// Page to show after the list reloads
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    Restore {
        id: EntityId,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Price a product for a dealer
    Calculate {
        #[arg(long)]
        product: EntityId,
        #[arg(long)]
        dealer: EntityId,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        #[arg(long)]
        unit_price: Option<Decimal>,
    },
}

#[derive(Subcommand)]
enum DealerCommand {
    Show { id: EntityId },
    DeleteUser { dealer_id: EntityId, user_id: EntityId },
}

#[derive(Subcommand)]
enum ProductCommand {
    Show { id: EntityId },
}

#[derive(Subcommand)]
enum RoleCommand {
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
}

#[derive(Subcommand)]
enum SessionCommand {
    Show,
    /// Store a bearer token and the operator identity it belongs to
    SetToken {
        token: String,
        #[arg(long, default_value = "operator")]
        username: String,
        #[arg(long, default_value = "")]
        role: String,
        /// Granted permission, repeatable
        #[arg(long = "permission")]
        permissions: Vec<String>,
        /// Merge upcoming discounts into dealer/product views by default
        #[arg(long)]
        include_upcoming: Option<bool>,
    },
    Clear,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DiscountTypeArg {
    Percentage,
    FixedAmount,
}

impl From<DiscountTypeArg> for DiscountType {
    fn from(value: DiscountTypeArg) -> Self {
        match value {
            DiscountTypeArg::Percentage => DiscountType::Percentage,
            DiscountTypeArg::FixedAmount => DiscountType::FixedAmount,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScopeArg {
    General,
    Products,
    Categories,
}

impl From<ScopeArg> for DiscountScope {
    fn from(value: ScopeArg) -> Self {
        match value {
            ScopeArg::General => DiscountScope::General,
            ScopeArg::Products => DiscountScope::Products,
            ScopeArg::Categories => DiscountScope::Categories,
        }
    }
}

#[derive(Args, Debug, Default)]
struct FormArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long = "type", value_enum)]
    discount_type: Option<DiscountTypeArg>,
    #[arg(long)]
    value: Option<Decimal>,
    /// YYYY-MM-DDTHH:MM
    #[arg(long)]
    start: Option<String>,
    #[arg(long)]
    end: Option<String>,
    #[arg(long)]
    active: Option<bool>,
    #[arg(long, value_enum)]
    scope: Option<ScopeArg>,
    #[arg(long = "product")]
    products: Vec<EntityId>,
    #[arg(long = "variant")]
    variants: Vec<EntityId>,
    #[arg(long = "category")]
    categories: Vec<EntityId>,
    #[arg(long = "dealer")]
    dealers: Vec<EntityId>,
    #[arg(long)]
    min_order: Option<Decimal>,
    #[arg(long)]
    max_discount: Option<Decimal>,
    #[arg(long)]
    usage_limit: Option<u32>,
    #[arg(long)]
    usage_limit_per_customer: Option<u32>,
    #[arg(long)]
    code: Option<String>,
    #[arg(long)]
    priority: Option<i32>,
    #[arg(long)]
    stackable: Option<bool>,
    #[arg(long)]
    auto_apply: Option<bool>,
}

impl FormArgs {
    /// Overlay the given flags on `form`
    fn apply(self, form: &mut DiscountForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(kind) = self.discount_type {
            form.discount_type = kind.into();
        }
        if let Some(value) = self.value {
            form.discount_value = value;
        }
        if let Some(start) = self.start {
            form.start_date = start;
        }
        if let Some(end) = self.end {
            form.end_date = end;
        }
        if let Some(active) = self.active {
            form.is_active = active;
        }
        if let Some(scope) = self.scope {
            form.scope = scope.into();
        }
        if !self.products.is_empty() {
            form.product_ids = self.products;
        }
        if !self.variants.is_empty() {
            form.variant_ids = self.variants;
        }
        if !self.categories.is_empty() {
            form.category_ids = self.categories;
        }
        if !self.dealers.is_empty() {
            form.dealer_ids = self.dealers;
        }
        form.minimum_order_amount = self.min_order.or(form.minimum_order_amount);
        form.maximum_discount_amount = self.max_discount.or(form.maximum_discount_amount);
        form.usage_limit = self.usage_limit.or(form.usage_limit);
        form.usage_limit_per_customer = self
            .usage_limit_per_customer
            .or(form.usage_limit_per_customer);
        form.discount_code = self.code.or(form.discount_code.take());
        form.priority = self.priority.or(form.priority);
        if let Some(stackable) = self.stackable {
            form.stackable = stackable;
        }
        if let Some(auto_apply) = self.auto_apply {
            form.auto_apply = auto_apply;
        }
    }
}

impl Command {
    fn route(&self) -> Route {
        match self {
            Command::Discounts { command } => match command {
                DiscountCommand::List { .. } => Route::DiscountList,
                DiscountCommand::Search { .. } => Route::DiscountSearch,
                DiscountCommand::ByDealer { .. } => Route::DealerDiscounts,
                DiscountCommand::ByProduct { .. } => Route::ProductDiscounts,
                DiscountCommand::Expired => Route::ExpiredDiscounts,
                DiscountCommand::Upcoming => Route::UpcomingDiscounts,
                DiscountCommand::Show { .. } => Route::DiscountDetail,
                DiscountCommand::Create(_) => Route::DiscountCreate,
                DiscountCommand::Update { .. } => Route::DiscountEdit,
                DiscountCommand::Delete { .. } => Route::DiscountDelete,
                DiscountCommand::Restore { .. } => Route::DiscountRestore,
                DiscountCommand::Calculate { .. } => Route::DiscountCalculate,
            },
            Command::Dealers { command } => match command {
                DealerCommand::Show { .. } => Route::DealerDetail,
                DealerCommand::DeleteUser { .. } => Route::DealerUserDelete,
            },
            Command::Products { .. } => Route::ProductDetail,
            Command::Roles { .. } => Route::RoleList,
            Command::Session { .. } => Route::Session,
        }
    }
}

/// Prints view output as text or JSON
struct Output {
    json: bool,
}

impl Output {
    fn state<T: Serialize>(&self, state: &ViewState<T>, text: impl FnOnce(&T) -> String) {
        match (self.json, state) {
            (true, ViewState::Loaded(value)) => match serde_json::to_string_pretty(value) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::error!("Failed to serialize output: {e}"),
            },
            (true, _) => {}
            (false, state) => print!("{}", render::view_state(state, text)),
        }
    }

    fn alerts(&self, alerts: &Alerts) {
        for alert in alerts.drain() {
            eprintln!("{}", render::alert_line(&alert));
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(cli.json_logs);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> ConsoleConfig {
    let mut config = ConsoleConfig::from_env();
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if let Some(path) = &cli.session_file {
        config.session_file = path.clone();
    }
    if let Some(size) = cli.page_size.filter(|s| *s > 0) {
        config.page_size = size;
    }
    config
}

/// Returns `false` when the command ended with an error alert
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = load_config(&cli);
    let store = SessionStore::new(&config.session_file);
    let session = store
        .load()
        .with_context(|| format!("failed to read session {}", store.path().display()))?;

    let out = Output { json: cli.json };

    if let Command::Session { command } = cli.command {
        return session_command(command, &store, session, &out);
    }

    if let Err(denied) = guard::authorize(cli.command.route(), &session) {
        eprintln!("{}", denied_message(&denied));
        return Ok(false);
    }

    let include_upcoming_default = session.preferences().include_upcoming;
    let handle = SessionHandle::new(session);
    let http = NetworkHttpClient::new(&config.client_config(), handle)
        .context("failed to build HTTP client")?;
    let alerts = Alerts::new();
    let ctx = ViewContext::new(ApiClient::new(http), alerts.clone());

    tracing::debug!(api = %config.api_url, "Console ready");

    match cli.command {
        Command::Discounts { command } => {
            discount_command(command, ctx, &config, include_upcoming_default, &out).await
        }
        Command::Dealers { command } => dealer_command(command, ctx, &out).await,
        Command::Products {
            command: ProductCommand::Show { id },
        } => {
            let view = ProductDetailView::new(ctx);
            view.load(id).await;
            out.state(&view.state().await, render::product_detail);
        }
        Command::Roles {
            command: RoleCommand::List { page },
        } => {
            let view = RoleListView::new(ctx, config.page_size);
            if view.load().await.is_loaded() && page > 0 {
                view.show_page(page).await;
            }
            out.state(&view.state().await, render::role_page);
        }
        Command::Session { .. } => {}
    }

    let ok = !alerts.has_errors();
    out.alerts(&alerts);
    Ok(ok)
}

fn denied_message(err: &AppError) -> String {
    format!("[error] {} (E{:04})", err.message, err.code.code())
}

async fn discount_command(
    command: DiscountCommand,
    ctx: ViewContext<NetworkHttpClient>,
    config: &ConsoleConfig,
    include_upcoming_default: bool,
    out: &Output,
) {
    match command {
        DiscountCommand::List { page } => {
            let view = DiscountListView::new(ctx, config.page_size, config.search_debounce());
            view.show_page(page).await;
            out.state(&view.state().await, render::discount_page);
        }
        DiscountCommand::Search { query, page } => {
            let view = DiscountListView::new(ctx, config.page_size, config.search_debounce());
            view.search_now(&query).await;
            if let Some(hint) = view.hint().await {
                eprintln!("{hint}");
                return;
            }
            if page > 0 {
                view.show_page(page).await;
            }
            out.state(&view.state().await, render::discount_page);
        }
        DiscountCommand::ByDealer {
            dealer_id,
            include_upcoming,
        } => {
            let view = DealerDiscountsView::new(ctx);
            view.fetch(DealerQuery {
                dealer_id,
                include_upcoming: include_upcoming || include_upcoming_default,
            })
            .await;
            out.state(&view.state().await, |rows| render::discount_table(rows));
        }
        DiscountCommand::ByProduct {
            product_id,
            dealer,
            include_upcoming,
        } => {
            let view = ProductDiscountsView::new(ctx);
            view.fetch(ProductQuery {
                product_id,
                dealer_id: dealer,
                include_upcoming: include_upcoming || include_upcoming_default,
            })
            .await;
            out.state(&view.state().await, |rows| render::discount_table(rows));
        }
        DiscountCommand::Expired => {
            let view = ExpiredDiscountsView::new(ctx);
            view.mount().await;
            out.state(&view.state().await, |rows| render::discount_table(rows));
        }
        DiscountCommand::Upcoming => {
            let view = UpcomingDiscountsView::new(ctx);
            view.mount().await;
            out.state(&view.state().await, |rows| render::discount_table(rows));
        }
        DiscountCommand::Show { id } => match ctx.api.get_discount(id).await {
            Ok(discount) => out.state(&ViewState::Loaded(discount), render::discount_detail),
            Err(e) => ctx.alerts.error(&AppError::from(e)),
        },
        DiscountCommand::Create(args) => {
            let view = DiscountListView::new(ctx, config.page_size, config.search_debounce());
            let mut form = DiscountForm::default();
            args.apply(&mut form);
            if let Some(created) = view.editor().create(&form).await {
                out.state(&ViewState::Loaded(created), render::discount_detail);
            }
        }
        DiscountCommand::Update { id, form: args } => {
            let view = DiscountListView::new(ctx, config.page_size, config.search_debounce());
            let Some(mut form) = view.editor().load_for_edit(id).await else {
                return;
            };
            args.apply(&mut form);
            if let Some(updated) = view.editor().update(id, &form).await {
                out.state(&ViewState::Loaded(updated), render::discount_detail);
            }
        }
        DiscountCommand::Delete { id, page } => {
            let view = list_at(ctx, config, page);
            if view.delete(id).await.is_loaded() {
                out.state(&view.state().await, render::discount_page);
            }
        }
        DiscountCommand::Restore { id, page } => {
            let view = list_at(ctx, config, page);
            if view.restore(id).await.is_loaded() {
                out.state(&view.state().await, render::discount_page);
            }
        }
        DiscountCommand::Calculate {
            product,
            dealer,
            quantity,
            unit_price,
        } => {
            let view = DiscountCalculateView::new(ctx);
            let input = CalculationInput {
                product_id: Some(product),
                dealer_id: Some(dealer),
                quantity,
                unit_price,
            };
            view.calculate(&input).await;
            out.state(&view.state().await, render::calculation);
        }
    }
}

/// List view positioned on `page` without fetching it
fn list_at(
    ctx: ViewContext<NetworkHttpClient>,
    config: &ConsoleConfig,
    page: u32,
) -> DiscountListView<NetworkHttpClient> {
    DiscountListView::new(ctx, config.page_size, config.search_debounce()).at_page(page)
}

async fn dealer_command(command: DealerCommand, ctx: ViewContext<NetworkHttpClient>, out: &Output) {
    let view = DealerDetailView::new(ctx);
    match command {
        DealerCommand::Show { id } => {
            view.load(id).await;
        }
        DealerCommand::DeleteUser { dealer_id, user_id } => {
            if view.load(dealer_id).await.is_loaded() {
                view.delete_user(user_id).await;
            }
        }
    }
    out.state(&view.state().await, render::dealer_detail);
}

fn session_command(
    command: SessionCommand,
    store: &SessionStore,
    mut session: Session,
    out: &Output,
) -> anyhow::Result<bool> {
    match command {
        SessionCommand::Show => {
            if out.json {
                println!("{}", serde_json::to_string_pretty(&session)?);
                return Ok(true);
            }
            match session.user() {
                Some(user) if session.is_authenticated() => {
                    println!("Signed in as {} ({})", user.username, user.role);
                    println!("Permissions: {}", session.permissions().join(", "));
                }
                _ if session.is_authenticated() => println!("Token set, no operator identity"),
                _ => println!("Signed out"),
            }
            let prefs = session.preferences();
            println!(
                "Page size: {}, include upcoming: {}",
                prefs.page_size, prefs.include_upcoming
            );
        }
        SessionCommand::SetToken {
            token,
            username,
            role,
            permissions,
            include_upcoming,
        } => {
            session.set_token(Some(token));
            session.set_user(Some(UserInfo {
                id: username.clone(),
                username,
                role,
                permissions,
            }));
            if let Some(include) = include_upcoming {
                session.preferences_mut().include_upcoming = include;
            }
            store
                .save(&session)
                .with_context(|| format!("failed to write {}", store.path().display()))?;
            tracing::info!(path = %store.path().display(), "Session stored");
            println!("Session stored");
        }
        SessionCommand::Clear => {
            session.sign_out();
            store
                .save(&session)
                .with_context(|| format!("failed to write {}", store.path().display()))?;
            println!("Signed out");
        }
    }
    Ok(true)
}
