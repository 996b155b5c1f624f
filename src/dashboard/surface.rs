use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use super::view::{CurrentPanel, CurrentView, ForecastArea, ForecastPanel};
use crate::advisory::AdvisoryResult;

/// Destination for rendered view-models.
///
/// Panel updates carry the sequence number of the lookup that produced them;
/// an implementation must drop updates that do not belong to the latest lookup.
#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Start a new lookup: clear every result slot and remember `sequence`.
    /// Returns `false` if a newer lookup has already started.
    async fn begin_lookup(&self, sequence: u64) -> bool;

    /// Returns `false` if the update was stale and dropped
    async fn render_current(&self, sequence: u64, panel: CurrentPanel) -> bool;

    /// Returns `false` if the update was stale and dropped
    async fn render_forecast(&self, sequence: u64, panel: ForecastPanel) -> bool;

    /// Write text into the city input slot
    async fn set_input(&self, text: &str);

    /// Show a user-facing prompt
    async fn show_prompt(&self, message: &str);
}

/// Contents of every display slot
#[derive(Debug, Clone, PartialEq, Default, Serialize, ToSchema)]
pub struct DashboardSnapshot {
    /// Sequence number of the lookup currently displayed
    pub sequence: u64,
    pub input: String,
    pub current: Option<CurrentView>,
    pub forecast: ForecastArea,
    pub trend: Option<String>,
    pub advisory: Option<AdvisoryResult>,
    pub prompt: Option<String>,
}

/// In-memory rendering surface served to dashboard clients
#[derive(Debug, Default)]
pub struct DashboardSurface {
    state: RwLock<DashboardSnapshot>,
}

impl DashboardSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl RenderSurface for DashboardSurface {
    async fn begin_lookup(&self, sequence: u64) -> bool {
        let mut state = self.state.write().await;
        if sequence < state.sequence {
            return false;
        }

        state.sequence = sequence;
        state.current = None;
        state.forecast = ForecastArea::Empty;
        state.trend = None;
        state.advisory = None;
        state.prompt = None;
        true
    }

    async fn render_current(&self, sequence: u64, panel: CurrentPanel) -> bool {
        let mut state = self.state.write().await;
        if sequence != state.sequence {
            return false;
        }

        state.current = Some(panel.view);
        state.advisory = panel.advisory;
        true
    }

    async fn render_forecast(&self, sequence: u64, panel: ForecastPanel) -> bool {
        let mut state = self.state.write().await;
        if sequence != state.sequence {
            return false;
        }

        state.forecast = panel.area;
        state.trend = panel.trend;
        true
    }

    async fn set_input(&self, text: &str) {
        self.state.write().await.input = text.to_string();
    }

    async fn show_prompt(&self, message: &str) {
        self.state.write().await.prompt = Some(message.to_string());
    }
}
