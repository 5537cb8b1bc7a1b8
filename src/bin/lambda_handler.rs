//! AWS Lambda handler for single-property projections
//!
//! Accepts assumptions as JSON through a Lambda Function URL and returns the
//! year-one summary, headline metrics and the full yearly projection.
//! Assumptions may be sent as numbers or as the text a user typed into a form.

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use chrono::Utc;
use investment_projector::{
    assumptions::{Assumptions, RawInputs},
    projection::{
        Highlights, InvestmentProjector, InvestmentSummary, IrrPolicy, ProjectionConfig,
        YearProjection, DEFAULT_DISCOUNT_RATE, DEFAULT_HORIZON_YEARS, DEFAULT_VACANCY_RATE,
        MAX_HORIZON_YEARS,
    },
    report::ChartSeries,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Input for one projection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    /// The nine assumption fields, as numbers or form text
    #[serde(flatten)]
    pub assumptions: RawInputs,

    /// Years to project (default: 30)
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,

    /// Vacancy allowance in percent (default: 5%)
    #[serde(default = "default_vacancy_rate")]
    pub vacancy_rate: f64,

    /// Discount rate for NPV in percent (default: 8%)
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,

    /// e.g. "as-computed", "converged-only", "clamped:-0.99:10"
    #[serde(default)]
    pub irr_policy: Option<String>,

    /// Include chart-ready series in the response
    #[serde(default)]
    pub include_series: bool,
}

fn default_horizon_years() -> u32 { DEFAULT_HORIZON_YEARS }
fn default_vacancy_rate() -> f64 { DEFAULT_VACANCY_RATE * 100.0 }
fn default_discount_rate() -> f64 { DEFAULT_DISCOUNT_RATE * 100.0 }

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub assumptions: Assumptions,
    pub summary: InvestmentSummary,
    pub highlights: Highlights,
    pub years: Vec<YearProjection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<ChartSeries>,
    pub warnings: Vec<String>,
    pub execution_time_ms: u64,
    pub generated_at: String,
}

fn cors_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Methods": "POST, OPTIONS",
        "Access-Control-Allow-Headers": "Content-Type",
    })
}

fn error_response(status: u16, message: &str) -> Value {
    json!({
        "statusCode": status,
        "headers": cors_headers(),
        "body": json!({ "error": message }).to_string(),
    })
}

fn json_response(body: &ProjectionResponse) -> Result<Value, Error> {
    Ok(json!({
        "statusCode": 200,
        "headers": cors_headers(),
        "body": serde_json::to_string(body)?,
    }))
}

fn build_config(request: &ProjectionRequest) -> Result<ProjectionConfig, String> {
    if request.horizon_years > MAX_HORIZON_YEARS {
        return Err(format!(
            "horizonYears must be at most {}",
            MAX_HORIZON_YEARS
        ));
    }

    let mut config = ProjectionConfig {
        horizon_years: request.horizon_years,
        vacancy_rate: request.vacancy_rate / 100.0,
        discount_rate: request.discount_rate / 100.0,
        ..ProjectionConfig::default()
    };
    if let Some(policy) = &request.irr_policy {
        config.irr.policy = policy.parse::<IrrPolicy>().map_err(|e| e.to_string())?;
    }
    Ok(config)
}

/// Build the Function URL response for one request
fn respond(method: Option<&str>, body: Option<&str>, is_base64_encoded: bool) -> Result<Value, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if method == Some("OPTIONS") {
        return Ok(json!({
            "statusCode": 200,
            "headers": cors_headers(),
            "body": "",
        }));
    }

    if is_base64_encoded {
        return Ok(error_response(400, "Base64-encoded bodies are not supported"));
    }

    let request: ProjectionRequest = match serde_json::from_str(body.unwrap_or("{}")) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let config = match build_config(&request) {
        Ok(c) => c,
        Err(e) => return Ok(error_response(400, &e)),
    };
    let include_series = request.include_series;
    let assumptions = request.assumptions.to_assumptions();

    let warnings = assumptions.warnings();
    for w in &warnings {
        warn!("{}", w);
    }

    let result = InvestmentProjector::new(config).project(&assumptions);
    let highlights = result.highlights();
    let series = include_series.then(|| ChartSeries::from_result(&result));

    let execution_time_ms = start.elapsed().as_millis() as u64;
    info!("Projected {} years in {} ms", result.years.len(), execution_time_ms);

    let response = ProjectionResponse {
        assumptions,
        summary: result.summary,
        highlights,
        years: result.years,
        series,
        warnings,
        execution_time_ms,
        generated_at: Utc::now().to_rfc3339(),
    };

    json_response(&response)
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<Value, Error> {
    let request = event.payload;
    respond(
        request.request_context.http.method.as_deref(),
        request.body.as_deref(),
        request.is_base64_encoded,
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
