//! Player process control

use obscreen_domain::{ApiRequest, ProcessOperation, Result};
use serde_json::Value;

use crate::params::ParameterBag;
use crate::ports::ApiExecutor;

const PLAYER_REFRESH: &str = "/api/processes/player-refresh";

pub async fn execute(
    operation: ProcessOperation,
    executor: &dyn ApiExecutor,
    _params: &ParameterBag<'_>,
) -> Result<Value> {
    match operation {
        ProcessOperation::RefreshPlayer => executor.execute(ApiRequest::post(PLAYER_REFRESH)).await,
    }
}
