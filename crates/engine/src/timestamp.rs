use chrono::{Duration, NaiveDate, NaiveDateTime};

/// A comparable scan instant, or the sort-last sentinel for dates the
/// normalizer could not interpret.
///
/// Derived `Ord` places `Unparseable` after every `At(_)`, so corrupt date
/// data never prevents a report from being ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScanInstant {
    At(NaiveDateTime),
    Unparseable,
}

impl ScanInstant {
    pub fn is_unparseable(&self) -> bool {
        matches!(self, ScanInstant::Unparseable)
    }
}

/// Interpret a raw scan-event date, arriving in any of the formats seen in
/// field exports: ISO, space-separated, dot-separated, slash-delimited with
/// ambiguous day/month order, or a raw spreadsheet serial number.
///
/// Never fails; anything uninterpretable becomes [`ScanInstant::Unparseable`].
pub fn normalize(raw: &str) -> ScanInstant {
    let clean = raw.trim();
    if clean.is_empty() {
        return ScanInstant::Unparseable;
    }

    if is_serial(clean) {
        return from_serial(clean);
    }

    // Dot-delimited dates become dash-delimited before structured parsing.
    let mut normalized = clean.replace('.', "-");

    if let Some(reassembled) = reassemble_slash_date(clean) {
        normalized = reassembled;
    }

    // "YYYY-MM-DD HH:MM[:SS]" → ISO 'T' form.
    if looks_like_date_space_time(&normalized) {
        normalized = normalized.replacen(' ', "T", 1);
    }

    match parse_lenient(&normalized) {
        Some(dt) => ScanInstant::At(dt),
        // Normalization may have mangled an exotic format; give the
        // original text one last chance.
        None => match parse_lenient(clean) {
            Some(dt) => ScanInstant::At(dt),
            None => ScanInstant::Unparseable,
        },
    }
}

/// All digits with an optional single decimal part, e.g. "45292" or "45292.5".
fn is_serial(s: &str) -> bool {
    let mut parts = s.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next();

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match frac_part {
        None => true,
        Some(f) => !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()),
    }
}

/// Spreadsheet serial day count, day 0 = 1899-12-31. The historical 1900
/// leap-year defect means serial 2 = 1900-01-01, hence the −2 shift against
/// the 1900-01-01 epoch. The fractional part is time-of-day.
fn from_serial(s: &str) -> ScanInstant {
    let serial: f64 = match s.parse() {
        Ok(v) => v,
        Err(_) => return ScanInstant::Unparseable,
    };

    // ~±20k years; anything outside is corrupt data, not a date.
    let shifted = serial - 2.0;
    if !shifted.is_finite() || shifted.abs() > 8_000_000.0 {
        return ScanInstant::Unparseable;
    }

    let days = shifted.floor();
    let day_seconds = ((shifted - days) * 86_400.0).round() as i64;

    let epoch = match NaiveDate::from_ymd_opt(1900, 1, 1) {
        Some(d) => d.and_hms_opt(0, 0, 0).unwrap_or_default(),
        None => return ScanInstant::Unparseable,
    };

    epoch
        .checked_add_signed(Duration::days(days as i64))
        .and_then(|dt| dt.checked_add_signed(Duration::seconds(day_seconds)))
        .map(ScanInstant::At)
        .unwrap_or(ScanInstant::Unparseable)
}

/// Rewrite `A/B/YYYY[ time]` as `YYYY-MM-DD[ time]`.
///
/// Day/month disambiguation policy (preserved exactly — consumers depend on
/// it): first component >12 means day-first; else second component >12 means
/// month-first; else genuinely ambiguous and day-first is assumed.
fn reassemble_slash_date(s: &str) -> Option<String> {
    let mut parts = s.splitn(2, char::is_whitespace);
    let date_part = parts.next()?;
    let time_part = parts.next().map(str::trim).filter(|t| !t.is_empty());

    let fields: Vec<&str> = date_part.split('/').collect();
    if fields.len() != 3 {
        return None;
    }
    let ok_num = |f: &str, max_len: usize| {
        !f.is_empty() && f.len() <= max_len && f.bytes().all(|b| b.is_ascii_digit())
    };
    if !ok_num(fields[0], 2) || !ok_num(fields[1], 2) || fields[2].len() != 4 || !ok_num(fields[2], 4) {
        return None;
    }

    let first: u32 = fields[0].parse().ok()?;
    let second: u32 = fields[1].parse().ok()?;
    let year = fields[2];

    let (day, month) = if first > 12 {
        (first, second)
    } else if second > 12 {
        (second, first)
    } else {
        // Ambiguous — day-first.
        (first, second)
    };

    let mut out = format!("{year}-{month:02}-{day:02}");
    if let Some(time) = time_part {
        out.push(' ');
        out.push_str(time);
    }
    Some(out)
}

fn looks_like_date_space_time(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 16 {
        return false;
    }
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    digits(0..4)
        && bytes[4] == b'-'
        && digits(5..7)
        && bytes[7] == b'-'
        && digits(8..10)
        && bytes[10] == b' '
        && digits(11..13)
        && bytes[13] == b':'
        && digits(14..16)
}

/// General-purpose fallback: a fixed list of formats tried in order.
fn parse_lenient(s: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%d %b %Y %H:%M:%S",
    ];
    const DATE_FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d %b %Y",
        "%b %d, %Y",
        "%B %d, %Y",
    ];

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}
