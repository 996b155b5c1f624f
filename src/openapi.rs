use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::advisory::{AdvisoryResult, Severity};
use crate::dashboard::handlers::{Capabilities, SearchAccepted};
use crate::dashboard::view::{CurrentView, ForecastArea, ForecastCard};
use crate::dashboard::DashboardSnapshot;
use crate::error::ErrorResponse;
use crate::forecast::handlers::ForecastReport;
use crate::forecast::models::{DailySummary, ForecastOutlook, TrendSummary};
use crate::icons::{ColorCategory, IconStyle};
use crate::voice::VoiceOutcome;
use crate::weather::handlers::CurrentReport;
use crate::weather::models::CurrentConditions;

/// OpenAPI documentation for the Skydash API
///
/// Schema-only documentation; handlers carry no path annotations.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Skydash API",
        version = "1.0.0",
        description = "A weather dashboard backed by OpenWeatherMap. Shows current conditions, a five-day outlook with trend summary, and a weather advisory.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    tags(
        (name = "dashboard", description = "City search, voice input and rendered dashboard state"),
        (name = "weather", description = "Current conditions and advisory"),
        (name = "forecast", description = "Daily summaries and forecast trend")
    ),
    components(
        schemas(
            ErrorResponse,
            DashboardSnapshot,
            CurrentView,
            ForecastArea,
            ForecastCard,
            AdvisoryResult,
            Severity,
            IconStyle,
            ColorCategory,
            SearchAccepted,
            Capabilities,
            VoiceOutcome,
            CurrentConditions,
            CurrentReport,
            ForecastOutlook,
            DailySummary,
            TrendSummary,
            ForecastReport,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_dashboard_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components present").schemas;

        for name in ["DashboardSnapshot", "ForecastArea", "VoiceOutcome", "TrendSummary"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
