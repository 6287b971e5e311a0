use chrono::NaiveDateTime;

pub const TITLE: &str = "Expect to actually burn";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const UNNAMED_ITEM: &str = "This item";

pub fn render(
    item_id: Option<&str>,
    created: NaiveDateTime,
    turnaround_days: i64,
    delivery_date: NaiveDateTime,
    cost_hours: i64,
) -> String {
    let item = match item_id.map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => UNNAMED_ITEM,
    };

    format!(
        "{} created on {} has a turnaround of {} days and should be in FG status by {}. {} {} mhrs.",
        item,
        created.format(DATE_FORMAT),
        turnaround_days,
        delivery_date.format(DATE_FORMAT),
        TITLE,
        cost_hours
    )
}
