use super::errors::{ReportParseError, Segment};
use super::value_objects::{ActivityLevel, ReportFields, TribeSize};

// ============================================================================
// Field Report Parser
// ============================================================================
//
// Expected shape:  [address], tribe size, activity level, [current activity]
//
// The first bracketed segment is the address, the last one left after that
// is the current activity. What remains must be exactly two comma separated
// enumerated fields. Nothing is produced unless every stage succeeds.
//
// ============================================================================

/// Result of scanning out both bracketed segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSegments {
    pub address: String,
    pub current_activity: String,
    /// Text with both segments (brackets included) removed
    pub remainder: String,
}

pub fn scan_segments(text: &str) -> Result<BracketSegments, ReportParseError> {
    let (address, rest) = take_first_segment(text)?;
    let (current_activity, remainder) = take_last_segment(&rest)?;

    Ok(BracketSegments {
        address,
        current_activity,
        remainder,
    })
}

fn take_first_segment(text: &str) -> Result<(String, String), ReportParseError> {
    let segment = Segment::Address;
    let open = text
        .find('[')
        .ok_or(ReportParseError::MissingOpeningBracket(segment))?;
    if text[..open].contains(']') {
        return Err(ReportParseError::MisorderedBrackets(segment));
    }
    let close = open
        + 1
        + text[open + 1..]
            .find(']')
            .ok_or(ReportParseError::MissingClosingBracket(segment))?;

    Ok(cut(text, open, close))
}

fn take_last_segment(text: &str) -> Result<(String, String), ReportParseError> {
    let segment = Segment::CurrentActivity;
    let open = text
        .rfind('[')
        .ok_or(ReportParseError::MissingOpeningBracket(segment))?;
    let close = match text[open + 1..].find(']') {
        Some(offset) => open + 1 + offset,
        None if text[..open].contains(']') => {
            return Err(ReportParseError::MisorderedBrackets(segment))
        }
        None => return Err(ReportParseError::MissingClosingBracket(segment)),
    };

    Ok(cut(text, open, close))
}

/// Split out the content between `open` and `close`, returning it and the
/// text with the whole bracketed segment removed.
fn cut(text: &str, open: usize, close: usize) -> (String, String) {
    let content = text[open + 1..close].trim().to_string();
    let remainder = format!("{}{}", &text[..open], &text[close + 1..]);
    (content, remainder)
}

pub fn parse_report(text: &str) -> Result<ReportFields, ReportParseError> {
    let segments = scan_segments(text)?;

    let remainder = segments
        .remainder
        .trim_matches(|c: char| c == ',' || c.is_whitespace());
    let fields: Vec<&str> = if remainder.is_empty() {
        Vec::new()
    } else {
        remainder.split(',').map(str::trim).collect()
    };

    let [tribe_size, activity_level] = fields.as_slice() else {
        return Err(ReportParseError::FieldCount(fields.len()));
    };

    Ok(ReportFields {
        address: segments.address,
        tribe_size: TribeSize::parse(tribe_size)?,
        activity_level: ActivityLevel::parse(activity_level)?,
        current_activity: segments.current_activity,
    })
}
