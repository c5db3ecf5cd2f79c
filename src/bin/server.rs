use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use spendlog::{
    AppState, ListingConfig, PaginationConfig, SortSeparator, ZeroLimitPolicy, build_router,
    graceful_shutdown, logging_middleware,
};

/// The REST API server for spendlog.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database. Uses an in-memory
    /// database if omitted.
    #[arg(long)]
    db_path: Option<String>,

    /// The address to serve the API from.
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    address: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// The separator between the column and direction in the `sort` parameter.
    #[arg(long, value_enum, default_value_t = SortSeparator::Hyphen)]
    sort_separator: SortSeparator,

    /// What `limit=0` means: an empty page, or the default page size.
    #[arg(long, value_enum, default_value_t = ZeroLimitPolicy::EmptyPage)]
    zero_limit: ZeroLimitPolicy,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::new(args.address, args.port);

    let connection = match &args.db_path {
        Some(db_path) => Connection::open(db_path),
        None => {
            tracing::warn!("No database path given, data will be lost on shutdown");
            Connection::open_in_memory()
        }
    }
    .expect("Could not open database.");

    let listing_config = ListingConfig {
        pagination: PaginationConfig {
            zero_limit: args.zero_limit,
        },
        sort_separator: args.sort_separator,
    };
    let app_state =
        AppState::new(connection, listing_config).expect("Could not initialize database.");

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(app_state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("Server stopped unexpectedly.");
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
