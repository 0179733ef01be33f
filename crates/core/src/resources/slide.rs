//! Slide operations and scheduling

use obscreen_domain::constants::{
    DEFAULT_INWEEK_DAY, DEFAULT_INWEEK_TIME_END, DEFAULT_INWEEK_TIME_START,
    DEFAULT_SLIDE_DURATION, DEFAULT_SLIDE_POSITION,
};
use obscreen_domain::{
    ApiRequest, ObscreenError, ResourceOperation, Result, SchedulingEnd, SchedulingStart,
    SlideOperation,
};
use serde_json::{Map, Value};

use super::{deleted, entity_path, integer_id};
use crate::mappings::MappedFields;
use crate::params::ParameterBag;
use crate::ports::ApiExecutor;
use crate::request_builder::JsonBody;
use crate::validators::{require_day_of_week, require_schedule_date_time, require_time};

const SLIDES: &str = "/api/slides/";
const POSITIONS: &str = "/api/slides/positions";

pub async fn execute(
    operation: SlideOperation,
    executor: &dyn ApiExecutor,
    params: &ParameterBag<'_>,
) -> Result<Value> {
    let request = match operation {
        SlideOperation::Create => create_request(params)?,
        SlideOperation::Delete => {
            let id = params.locator("slideId")?;
            executor.execute(ApiRequest::delete(entity_path(SLIDES, &id))).await?;
            return Ok(deleted());
        }
        SlideOperation::Get => ApiRequest::get(entity_path(SLIDES, &params.locator("slideId")?)),
        SlideOperation::GetAll => ApiRequest::get(SLIDES),
        SlideOperation::Update => update_request(params)?,
        SlideOperation::UpdatePositions => {
            let positions = parse_positions(params)?;
            let body = JsonBody::new().set("positions", Value::Object(positions)).into_map();
            ApiRequest::post(POSITIONS).with_json(body)
        }
    };
    executor.execute(request).await
}

/// The API takes these flags as `"true"`/`"false"` strings.
fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn create_request(params: &ParameterBag<'_>) -> Result<ApiRequest> {
    let content_id = integer_id("contentId", &params.locator("contentId")?)?;
    let playlist_id = params.locator("playlistId")?;
    let fields = MappedFields::read(params, ResourceOperation::Slide(SlideOperation::Create))?;

    let mut body = JsonBody::new()
        .set("content_id", content_id)
        .set("playlist_id", playlist_id)
        .set("enabled", flag(fields.boolean("enabled")?.unwrap_or(true)))
        .set("duration", fields.integer("duration")?.unwrap_or(DEFAULT_SLIDE_DURATION))
        .set("position", fields.integer("position")?.unwrap_or(DEFAULT_SLIDE_POSITION))
        .set("delegate_duration", flag(fields.boolean("delegateDuration")?.unwrap_or(false)));

    let start = params.parsed_or_default::<SchedulingStart>("schedulingStart")?;
    apply_scheduling(params, start, &mut body)?;

    Ok(ApiRequest::post(SLIDES).with_json(body.into_map()))
}

fn update_request(params: &ParameterBag<'_>) -> Result<ApiRequest> {
    let id = params.locator("slideId")?;
    let fields = MappedFields::read(params, ResourceOperation::Slide(SlideOperation::Update))?;
    let content_id = params
        .optional_locator("contentId")?
        .map(|id| integer_id("contentId", &id))
        .transpose()?;

    let mut body = JsonBody::new()
        .set_opt("enabled", fields.boolean("enabled")?.map(flag))
        .set_opt("duration", fields.integer("duration")?)
        .set_opt("delegate_duration", fields.boolean("delegateDuration")?.map(flag))
        .set_opt("content_id", content_id)
        .set_opt("playlist_id", params.optional_locator("playlistId")?);

    if let Some(start) = params.parsed::<SchedulingStart>("schedulingStart")? {
        apply_scheduling(params, start, &mut body)?;
    }

    Ok(ApiRequest::put(entity_path(SLIDES, &id)).with_json(body.into_map()))
}

/// Validate and add the scheduling parameters for `start`.
fn apply_scheduling(
    params: &ParameterBag<'_>,
    start: SchedulingStart,
    body: &mut JsonBody,
) -> Result<()> {
    body.insert("scheduling", start.as_str());

    match start {
        SchedulingStart::Loop => {}
        SchedulingStart::DateTime => {
            let datetime_start = params.required_string("datetimeStart")?;
            require_schedule_date_time("datetimeStart", &datetime_start)?;
            body.insert("datetime_start", datetime_start);

            if params.parsed_or_default::<SchedulingEnd>("schedulingEnd")? == SchedulingEnd::DateTime
            {
                let datetime_end = params.required_string("datetimeEnd")?;
                require_schedule_date_time("datetimeEnd", &datetime_end)?;
                body.insert("datetime_end", datetime_end);
            }
        }
        SchedulingStart::InWeek => {
            let day_start = params.integer_or("dayStart", DEFAULT_INWEEK_DAY)?;
            let day_end = params.integer_or("dayEnd", DEFAULT_INWEEK_DAY)?;
            let time_start = params.string_or("timeStart", DEFAULT_INWEEK_TIME_START)?;
            let time_end = params.string_or("timeEnd", DEFAULT_INWEEK_TIME_END)?;

            require_day_of_week("dayStart", day_start)?;
            require_day_of_week("dayEnd", day_end)?;
            require_time("timeStart", &time_start)?;
            require_time("timeEnd", &time_end)?;

            body.insert("day_start", day_start);
            body.insert("day_end", day_end);
            body.insert("time_start", time_start);
            body.insert("time_end", time_end);
        }
    }
    Ok(())
}

/// `{slide id: position}` from JSON text or an object.
fn parse_positions(params: &ParameterBag<'_>) -> Result<Map<String, Value>> {
    let invalid = |message: String| ObscreenError::validation("positions", message);

    let parsed = match params.raw("positions") {
        None => return Err(invalid("a JSON object of slide ids to positions is required".into())),
        Some(Value::String(text)) => serde_json::from_str::<Value>(text)
            .map_err(|e| invalid(format!("malformed JSON: {e}")))?,
        Some(other) => other.clone(),
    };

    let Value::Object(entries) = parsed else {
        return Err(invalid("expected a JSON object such as {\"123\": 1, \"456\": 2}".into()));
    };
    if entries.is_empty() {
        return Err(invalid("at least one slide position is required".into()));
    }

    entries
        .into_iter()
        .map(|(slide_id, position)| {
            if slide_id.trim().is_empty() {
                return Err(invalid("slide ids must not be empty".into()));
            }
            match position.as_i64() {
                Some(position) => Ok((slide_id, Value::from(position))),
                None => Err(invalid(format!("position for slide {slide_id} must be an integer"))),
            }
        })
        .collect()
}
