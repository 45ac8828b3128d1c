fn plural(value: u64) -> &'static str {
    if value > 1 {
        "s"
    } else {
        ""
    }
}

/// Formats a duration in seconds the way the dashboard shows it (pt-BR).
///
/// Only the two most significant units are shown: hours and minutes when the
/// duration is at least an hour, minutes and seconds when it is at least a
/// minute, seconds otherwise.
pub fn humanize_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (minutes, seconds) = (total / 60, total % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);

    if hours > 0 {
        format!(
            "{} hora{} e {} minuto{}",
            hours,
            plural(hours),
            minutes,
            plural(minutes)
        )
    } else if minutes > 0 {
        format!(
            "{} minuto{} e {} segundo{}",
            minutes,
            plural(minutes),
            seconds,
            plural(seconds)
        )
    } else {
        format!("{} segundo{}", seconds, plural(seconds))
    }
}
