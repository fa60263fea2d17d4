use std::{io, time::Duration};

use actix_cors::Cors;
use actix_web::{
    middleware::{self, Condition},
    web::Data,
    App, HttpServer,
};
use clap::Parser;
use relay::{
    consts::consts::{DEFAULT_BRAND, DEFAULT_CRM_BASE_URL},
    crm::{mercury::MercuryClient, options::CrmOptions},
    relay::relay::Relay,
};

mod routes;
mod tracers;

/// 📨 Lead Relay, forwards website lead forms to the Mercury CRM as a person and a linked opportunity
#[derive(Parser, Debug)]
struct Cli {
    /// Port the relay will listen on
    #[clap(short, long, env = "LEAD_RELAY_PORT", default_value = "9000")]
    port: u16,

    /// Address the relay will listen on
    #[clap(short, long, env = "LEAD_RELAY_ADDRESS", default_value = "0.0.0.0")]
    address: String,

    /// Logs every HTTP request
    #[clap(long)]
    log_http: bool,

    /// Prints relay spans, including CRM call timings
    #[clap(long)]
    trace: bool,

    #[clap(long, default_value_t = 2)]
    http_workers: usize,

    /// Mercury API base url, the account token and resource are appended to it
    #[clap(long, env = "MERCURY_BASE_URL", default_value = DEFAULT_CRM_BASE_URL)]
    crm_base_url: String,

    /// Account scoped token placed in the CRM request path
    #[clap(long, env = "MERCURY_ACCOUNT_TOKEN", hide_env_values = true)]
    crm_account_token: String,

    /// Static key sent in the `x-api-key` header
    #[clap(long, env = "MERCURY_API_KEY", hide_env_values = true)]
    crm_api_key: String,

    /// Bounds connecting to and waiting on each CRM call, calls are never retried
    #[clap(long, default_value_t = 30)]
    crm_timeout_secs: u64,

    /// Business name written into CRM notes
    #[clap(long, env = "LEAD_RELAY_BRAND", default_value = DEFAULT_BRAND)]
    brand: String,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    if args.trace {
        tracers::init_tracing_subscriber();
    }

    let crm_options = CrmOptions::default()
        .set_base_url(args.crm_base_url)
        .set_account_token(args.crm_account_token)
        .set_api_key(args.crm_api_key)
        .set_timeout(Duration::from_secs(args.crm_timeout_secs));

    let crm = MercuryClient::new(crm_options)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    log::info!("Relaying to CRM: {:?}", crm.options());

    let relay = Data::new(Relay::new(crm).set_brand(args.brand));

    log::info!("starting HTTP server on port {}.", args.port);

    log::info!(
        "Submission endpoint: http://{}:{}{}",
        args.address,
        args.port,
        routes::SUBMIT_PATH
    );

    let log_http = args.log_http;

    HttpServer::new(move || {
        App::new()
            .app_data(relay.clone())
            .configure(routes::configure::<MercuryClient>)
            .wrap(Cors::permissive())
            .wrap(Condition::new(log_http, middleware::Logger::default()))
    })
    .workers(args.http_workers)
    .bind((args.address, args.port))?
    .run()
    .await
}
