use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    AgeTracking, GrowthTable, Industry, ProjectionInput, YearSnapshot, project_with_table,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const EXPORT_FILENAME: &str = "wealthpath_projection.json";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliIndustry {
    Finance,
    Technology,
    Healthcare,
    Education,
    Manufacturing,
    Retail,
    Government,
    Consulting,
    Other,
}

impl From<CliIndustry> for Industry {
    fn from(value: CliIndustry) -> Self {
        match value {
            CliIndustry::Finance => Industry::Finance,
            CliIndustry::Technology => Industry::Technology,
            CliIndustry::Healthcare => Industry::Healthcare,
            CliIndustry::Education => Industry::Education,
            CliIndustry::Manufacturing => Industry::Manufacturing,
            CliIndustry::Retail => Industry::Retail,
            CliIndustry::Government => Industry::Government,
            CliIndustry::Consulting => Industry::Consulting,
            CliIndustry::Other => Industry::Other,
        }
    }
}

impl From<Industry> for CliIndustry {
    fn from(value: Industry) -> Self {
        match value {
            Industry::Finance => CliIndustry::Finance,
            Industry::Technology => CliIndustry::Technology,
            Industry::Healthcare => CliIndustry::Healthcare,
            Industry::Education => CliIndustry::Education,
            Industry::Manufacturing => CliIndustry::Manufacturing,
            Industry::Retail => CliIndustry::Retail,
            Industry::Government => CliIndustry::Government,
            Industry::Consulting => CliIndustry::Consulting,
            Industry::Other => CliIndustry::Other,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "wealthpath",
    about = "Year-by-year personal wealth projection (salary growth, rent, invest/cash split)"
)]
struct Cli {
    #[arg(long, default_value_t = 0.0, help = "Annual net salary")]
    starting_salary: f64,
    #[arg(long, default_value_t = 0.0, help = "Monthly rent")]
    monthly_rent: f64,
    #[arg(long, help = "Annual rent; defaults to 12x --monthly-rent")]
    annual_rent: Option<f64>,
    #[arg(long, default_value_t = 0.0, help = "Monthly non-rent expenses")]
    monthly_expenses: f64,
    #[arg(
        long,
        help = "Annual non-rent expenses; defaults to 12x --monthly-expenses"
    )]
    annual_expenses: Option<f64>,
    #[arg(long, default_value_t = 5, help = "Projection horizon in years")]
    years: u32,
    #[arg(
        long,
        value_enum,
        default_value_t = CliIndustry::Technology,
        help = "Industry selecting the annual salary growth rate"
    )]
    industry: CliIndustry,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Expected annual investment return in percent"
    )]
    investment_return: f64,
    #[arg(
        long,
        default_value_t = 30.0,
        help = "Share of annual savings routed to investments in percent"
    )]
    invest_ratio: f64,
    #[arg(
        long,
        help = "Current age; enables age tracking together with --marriage-age"
    )]
    current_age: Option<u32>,
    #[arg(
        long,
        help = "Planned marriage age; annual rent drops 20% from that age onward"
    )]
    marriage_age: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    starting_salary: Option<f64>,
    monthly_rent: Option<f64>,
    annual_rent: Option<f64>,
    monthly_expenses: Option<f64>,
    annual_expenses: Option<f64>,
    years: Option<u32>,
    industry: Option<String>,
    investment_return: Option<f64>,
    invest_ratio: Option<f64>,
    current_age: Option<u32>,
    marriage_age: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryMetrics {
    final_total_wealth: f64,
    final_invested_balance: f64,
    final_salary: f64,
    final_annual_savings: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    industry: &'static str,
    growth_rate: f64,
    summary: Option<SummaryMetrics>,
    years: Vec<YearSnapshot>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: Cli) -> Result<ProjectionInput, String> {
    for (name, value) in [
        ("--starting-salary", cli.starting_salary),
        ("--monthly-rent", cli.monthly_rent),
        ("--monthly-expenses", cli.monthly_expenses),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{name} must be >= 0"));
        }
    }

    for (name, value) in [
        ("--annual-rent", cli.annual_rent),
        ("--annual-expenses", cli.annual_expenses),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(format!("{name} must be >= 0"));
            }
        }
    }

    if cli.years == 0 || cli.years > 100 {
        return Err("--years must be between 1 and 100".to_string());
    }

    if !(0.0..=100.0).contains(&cli.investment_return) {
        return Err("--investment-return must be between 0 and 100".to_string());
    }

    if !(0.0..=100.0).contains(&cli.invest_ratio) {
        return Err("--invest-ratio must be between 0 and 100".to_string());
    }

    let age_tracking = match (cli.current_age, cli.marriage_age) {
        (None, None) => AgeTracking::Disabled,
        (Some(current_age), Some(marriage_age)) => {
            for (name, age) in [
                ("--current-age", current_age),
                ("--marriage-age", marriage_age),
            ] {
                if !(18..=100).contains(&age) {
                    return Err(format!("{name} must be between 18 and 100"));
                }
            }
            AgeTracking::Enabled {
                current_age,
                marriage_age,
            }
        }
        _ => {
            return Err(
                "--current-age and --marriage-age must be supplied together".to_string(),
            );
        }
    };

    Ok(ProjectionInput {
        starting_salary: cli.starting_salary,
        annual_rent: cli.annual_rent.unwrap_or(cli.monthly_rent * 12.0),
        annual_other_expenses: cli.annual_expenses.unwrap_or(cli.monthly_expenses * 12.0),
        years: cli.years,
        industry: cli.industry.into(),
        investment_return_rate: cli.investment_return / 100.0,
        invest_ratio: cli.invest_ratio / 100.0,
        age_tracking,
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/export", get(export_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("wealthpath HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

/// One-shot mode: parse flags, run a single projection, print it as JSON.
pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let inputs = build_inputs(cli)?;
    let response = build_project_response(&inputs, &GrowthTable::default());
    let json = serde_json::to_string_pretty(&response)
        .map_err(|e| format!("Failed to serialize projection: {e}"))?;
    println!("{json}");
    Ok(())
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn export_handler(Query(payload): Query<ProjectPayload>) -> Response {
    attach_export_disposition(project_handler_impl(payload))
}

fn attach_export_disposition(mut response: Response) -> Response {
    if response.status() == StatusCode::OK {
        response.headers_mut().insert(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILENAME}\"")
                .parse()
                .expect("valid header"),
        );
    }
    response
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let response = build_project_response(&inputs, &GrowthTable::default());
    json_response(StatusCode::OK, response)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<ProjectionInput, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload)
}

fn inputs_from_payload(payload: ProjectPayload) -> Result<ProjectionInput, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.starting_salary {
        cli.starting_salary = v;
    }
    if let Some(v) = payload.monthly_rent {
        cli.monthly_rent = v;
    }
    if let Some(v) = payload.annual_rent {
        cli.annual_rent = Some(v);
    }
    if let Some(v) = payload.monthly_expenses {
        cli.monthly_expenses = v;
    }
    if let Some(v) = payload.annual_expenses {
        cli.annual_expenses = Some(v);
    }
    if let Some(v) = payload.years {
        cli.years = v;
    }
    if let Some(v) = payload.industry {
        cli.industry = Industry::from_key(&v).into();
    }
    if let Some(v) = payload.investment_return {
        cli.investment_return = v;
    }
    if let Some(v) = payload.invest_ratio {
        cli.invest_ratio = v;
    }
    if let Some(v) = payload.current_age {
        cli.current_age = Some(v);
    }
    if let Some(v) = payload.marriage_age {
        cli.marriage_age = Some(v);
    }

    build_inputs(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        starting_salary: 0.0,
        monthly_rent: 0.0,
        annual_rent: None,
        monthly_expenses: 0.0,
        annual_expenses: None,
        years: 5,
        industry: CliIndustry::Technology,
        investment_return: 5.0,
        invest_ratio: 30.0,
        current_age: None,
        marriage_age: None,
    }
}

fn build_project_response(inputs: &ProjectionInput, growth: &GrowthTable) -> ProjectResponse {
    let result = project_with_table(inputs, growth);
    let summary = result.final_snapshot().map(|last| SummaryMetrics {
        final_total_wealth: last.total_wealth,
        final_invested_balance: last.invested_balance,
        final_salary: last.salary,
        final_annual_savings: last.annual_savings,
    });

    ProjectResponse {
        industry: inputs.industry.key(),
        growth_rate: growth.rate(inputs.industry),
        summary,
        years: result.snapshots,
    }
}
