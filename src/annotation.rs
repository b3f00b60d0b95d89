/// Renders a day's value for display inside its cell.
///
/// Integral values are written without a decimal point. Anything else is
/// rounded to `precision` digits, keeping at least one digit after the
/// point and dropping further trailing zeros.
pub fn format_value(value: Option<f64>, precision: usize) -> Option<String> {
    let value = value.filter(|v| v.is_finite())?;

    if value == value.trunc() {
        // -0.0 prints as "-0"
        return Some(format!("{:.0}", value + 0.0));
    }

    let mut text = format!("{:.*}", precision, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').len();
        text.truncate(trimmed);
        if text.ends_with('.') {
            text.push('0');
        }
    } else {
        text.push_str(".0");
    }

    Some(text)
}
