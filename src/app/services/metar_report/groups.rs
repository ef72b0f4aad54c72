//! Typed METAR body groups
//!
//! Each group type recognises a single whitespace-delimited token (or, for
//! split statute-mile visibilities, a pair of tokens) and knows how to render
//! itself as readable text.

use crate::constants::{HPA_PER_INHG, METERS_PER_STATUTE_MILE};
use regex::Regex;
use std::sync::LazyLock;

static WIND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<dir>\d{3}|VRB)(?P<speed>\d{2,3})(?:G(?P<gust>\d{2,3}))?(?P<unit>KT|MPS|KMH)$")
        .expect("wind pattern is valid")
});

static WIND_VARIATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}V\d{3}$").expect("wind variation pattern is valid"));

static VIS_METERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<dist>\d{4})(?P<dir>NDV|NE|NW|SE|SW|N|E|S|W)?$")
        .expect("metric visibility pattern is valid")
});

static VIS_MILES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<qual>[MP])?(?:(?P<num>\d)/(?P<den>\d{1,2})|(?P<whole>\d{1,2}))SM$")
        .expect("statute mile visibility pattern is valid")
});

static RVR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^R\d{2}[LCR]?/").expect("runway visual range pattern is valid"));

static WEATHER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<int>[-+]|VC)?(?P<desc>MI|PR|BC|DR|BL|SH|TS|FZ)?(?P<phen>(?:DZ|RA|SN|SG|IC|PL|GR|GS|UP|BR|FG|FU|VA|DU|SA|HZ|PY|PO|SQ|FC|SS|DS)*)$",
    )
    .expect("weather pattern is valid")
});

static SKY_LAYER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<cover>FEW|SCT|BKN|OVC|VV)(?P<height>\d{3}|///)(?P<kind>CB|TCU|///)?$")
        .expect("sky layer pattern is valid")
});

static TEMPERATURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<temp>M?\d{2})/(?P<dew>M?\d{2})?$").expect("temperature pattern is valid")
});

static PRESSURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<unit>[QA])(?P<value>\d{4})$").expect("pressure pattern is valid")
});

// =============================================================================
// Wind
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedUnit {
    Knots,
    MetersPerSecond,
    KilometersPerHour,
}

impl SpeedUnit {
    fn label(&self) -> &'static str {
        match self {
            SpeedUnit::Knots => "knots",
            SpeedUnit::MetersPerSecond => "meters per second",
            SpeedUnit::KilometersPerHour => "km/h",
        }
    }
}

/// Surface wind group, e.g. `23012G25KT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wind {
    /// True direction in degrees, `None` when variable
    pub direction: Option<u16>,
    pub speed: u16,
    pub gust: Option<u16>,
    pub unit: SpeedUnit,
}

impl Wind {
    pub fn parse(token: &str) -> Option<Self> {
        let caps = WIND_RE.captures(token)?;
        let direction = match &caps["dir"] {
            "VRB" => None,
            dir => Some(dir.parse().ok()?),
        };
        let unit = match &caps["unit"] {
            "MPS" => SpeedUnit::MetersPerSecond,
            "KMH" => SpeedUnit::KilometersPerHour,
            _ => SpeedUnit::Knots,
        };

        Some(Self {
            direction,
            speed: caps["speed"].parse().ok()?,
            gust: caps.name("gust").and_then(|g| g.as_str().parse().ok()),
            unit,
        })
    }

    pub fn describe(&self) -> String {
        if self.speed == 0 && self.gust.is_none() && self.direction.is_none_or(|d| d == 0) {
            return "calm".to_string();
        }

        let mut text = match self.direction {
            Some(direction) => format!(
                "{} degrees at {} {}",
                direction,
                self.speed,
                self.unit.label()
            ),
            None => format!("variable at {} {}", self.speed, self.unit.label()),
        };
        if let Some(gust) = self.gust {
            text.push_str(&format!(", gusting to {} {}", gust, self.unit.label()));
        }
        text
    }
}

/// Variable wind direction range, e.g. `180V240`; recognised and skipped
pub fn is_wind_variation(token: &str) -> bool {
    WIND_VARIATION_RE.is_match(token)
}

/// Runway visual range group; recognised and skipped
pub fn is_runway_visual_range(token: &str) -> bool {
    RVR_RE.is_match(token)
}

// =============================================================================
// Visibility
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    GreaterThan,
    LessThan,
}

/// Prevailing visibility normalised to meters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    pub meters: u32,
    pub bound: Option<Bound>,
    pub direction: Option<String>,
}

impl Visibility {
    /// Visibility implied by `CAVOK` (10 km or more)
    pub fn cavok() -> Self {
        Self {
            meters: 10000,
            bound: Some(Bound::GreaterThan),
            direction: None,
        }
    }

    /// Metric group, e.g. `6000`, `9999`, `4000NE`
    pub fn parse_metric(token: &str) -> Option<Self> {
        let caps = VIS_METERS_RE.captures(token)?;
        if &caps["dist"] == "9999" {
            return Some(Self::cavok());
        }

        let direction = caps
            .name("dir")
            .map(|d| d.as_str())
            .filter(|d| *d != "NDV")
            .map(str::to_string);

        Some(Self {
            meters: caps["dist"].parse().ok()?,
            bound: None,
            direction,
        })
    }

    /// Statute mile group, optionally preceded by a whole-mile token
    /// (`1 1/2SM` arrives as `whole = Some("1")`, `token = "1/2SM"`)
    pub fn parse_statute(whole: Option<&str>, token: &str) -> Option<Self> {
        let caps = VIS_MILES_RE.captures(token)?;

        let mut miles = match (caps.name("whole"), caps.name("num"), caps.name("den")) {
            (Some(whole), _, _) => whole.as_str().parse::<f64>().ok()?,
            (None, Some(num), Some(den)) => {
                let den = den.as_str().parse::<f64>().ok()?;
                if den == 0.0 {
                    return None;
                }
                num.as_str().parse::<f64>().ok()? / den
            }
            _ => return None,
        };
        if let Some(whole) = whole {
            // A leading whole-mile token is only valid in front of a fraction
            caps.name("num")?;
            miles += whole.parse::<f64>().ok()?;
        }

        let bound = caps.name("qual").map(|q| match q.as_str() {
            "M" => Bound::LessThan,
            _ => Bound::GreaterThan,
        });

        Some(Self {
            meters: (miles * METERS_PER_STATUTE_MILE).round() as u32,
            bound,
            direction: None,
        })
    }

    /// Whether a token could be the whole-mile half of a split visibility
    pub fn is_whole_miles(token: &str) -> bool {
        token.len() == 1 && token.chars().all(|c| c.is_ascii_digit())
    }

    pub fn describe(&self) -> String {
        let prefix = match self.bound {
            Some(Bound::GreaterThan) => "greater than ",
            Some(Bound::LessThan) => "less than ",
            None => "",
        };
        match &self.direction {
            Some(direction) => format!("{}{} meters to the {}", prefix, self.meters, direction),
            None => format!("{}{} meters", prefix, self.meters),
        }
    }
}

// =============================================================================
// Present Weather
// =============================================================================

/// Present weather group, e.g. `-RA`, `+TSRA`, `VCSH`, `BR`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherGroup {
    pub intensity: Option<String>,
    pub descriptor: Option<String>,
    pub phenomena: Vec<String>,
}

impl WeatherGroup {
    pub fn parse(token: &str) -> Option<Self> {
        let caps = WEATHER_RE.captures(token)?;
        let descriptor = caps.name("desc").map(|d| d.as_str().to_string());
        let phenomena_codes = caps.name("phen").map_or("", |p| p.as_str());

        if descriptor.is_none() && phenomena_codes.is_empty() {
            return None;
        }

        let phenomena = phenomena_codes
            .as_bytes()
            .chunks(2)
            .filter_map(|chunk| std::str::from_utf8(chunk).ok())
            .map(str::to_string)
            .collect();

        Some(Self {
            intensity: caps.name("int").map(|i| i.as_str().to_string()),
            descriptor,
            phenomena,
        })
    }

    pub fn describe(&self) -> String {
        let mut words: Vec<String> = Vec::new();

        match self.intensity.as_deref() {
            Some("-") => words.push("light".to_string()),
            Some("+") => words.push("heavy".to_string()),
            _ => {}
        }

        let phenomena = self
            .phenomena
            .iter()
            .map(|code| phenomenon_name(code))
            .collect::<Vec<_>>()
            .join(" and ");

        match self.descriptor.as_deref() {
            Some("SH") if phenomena.is_empty() => words.push("showers".to_string()),
            Some("SH") => words.push(format!("{} showers", phenomena)),
            Some("TS") if phenomena.is_empty() => words.push("thunderstorm".to_string()),
            Some("TS") => words.push(format!("thunderstorm with {}", phenomena)),
            Some(desc) => {
                words.push(descriptor_name(desc).to_string());
                if !phenomena.is_empty() {
                    words.push(phenomena);
                }
            }
            None => words.push(phenomena),
        }

        if self.intensity.as_deref() == Some("VC") {
            words.push("in the vicinity".to_string());
        }

        words.join(" ")
    }
}

fn descriptor_name(code: &str) -> &'static str {
    match code {
        "MI" => "shallow",
        "PR" => "partial",
        "BC" => "patches of",
        "DR" => "low drifting",
        "BL" => "blowing",
        "FZ" => "freezing",
        "SH" => "showers",
        "TS" => "thunderstorm",
        _ => "",
    }
}

fn phenomenon_name(code: &str) -> &'static str {
    match code {
        "DZ" => "drizzle",
        "RA" => "rain",
        "SN" => "snow",
        "SG" => "snow grains",
        "IC" => "ice crystals",
        "PL" => "ice pellets",
        "GR" => "hail",
        "GS" => "small hail",
        "UP" => "unknown precipitation",
        "BR" => "mist",
        "FG" => "fog",
        "FU" => "smoke",
        "VA" => "volcanic ash",
        "DU" => "dust",
        "SA" => "sand",
        "HZ" => "haze",
        "PY" => "spray",
        "PO" => "dust whirls",
        "SQ" => "squalls",
        "FC" => "funnel cloud",
        "SS" => "sandstorm",
        "DS" => "duststorm",
        _ => "unknown phenomenon",
    }
}

// =============================================================================
// Sky Condition
// =============================================================================

/// Sky condition group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkyGroup {
    /// `FEW`, `SCT`, `BKN` or `OVC` layer with optional height and cloud type
    Layer {
        cover: String,
        height_feet: Option<u32>,
        cloud_type: Option<String>,
    },
    /// `VV` obscured sky with vertical visibility
    VerticalVisibility { height_feet: Option<u32> },
    /// `SKC`, `CLR`, `NSC`, `NCD` or implied by `CAVOK`
    Clear { code: String },
}

impl SkyGroup {
    pub fn parse(token: &str) -> Option<Self> {
        if matches!(token, "SKC" | "CLR" | "NSC" | "NCD") {
            return Some(SkyGroup::Clear {
                code: token.to_string(),
            });
        }

        let caps = SKY_LAYER_RE.captures(token)?;
        let height_feet = caps["height"].parse::<u32>().ok().map(|h| h * 100);

        if &caps["cover"] == "VV" {
            return Some(SkyGroup::VerticalVisibility { height_feet });
        }

        Some(SkyGroup::Layer {
            cover: caps["cover"].to_string(),
            height_feet,
            cloud_type: caps
                .name("kind")
                .map(|k| k.as_str())
                .filter(|k| *k != "///")
                .map(str::to_string),
        })
    }

    pub fn describe(&self) -> String {
        match self {
            SkyGroup::Layer {
                cover,
                height_feet,
                cloud_type,
            } => {
                let what = match cloud_type.as_deref() {
                    Some("CB") => Some("cumulonimbus"),
                    Some("TCU") => Some("towering cumulus"),
                    _ => None,
                };
                let amount = match (cover.as_str(), what) {
                    ("FEW", what) => format!("a few {}", what.unwrap_or("clouds")),
                    ("SCT", what) => format!("scattered {}", what.unwrap_or("clouds")),
                    ("BKN", what) => format!("broken {}", what.unwrap_or("clouds")),
                    ("OVC", Some(what)) => format!("overcast {}", what),
                    _ => "overcast".to_string(),
                };
                match height_feet {
                    Some(height) => format!("{} at {} feet", amount, height),
                    None => format!("{} at unknown height", amount),
                }
            }
            SkyGroup::VerticalVisibility {
                height_feet: Some(height),
            } => format!("indefinite ceiling, vertical visibility to {} feet", height),
            SkyGroup::VerticalVisibility { height_feet: None } => {
                "indefinite ceiling".to_string()
            }
            SkyGroup::Clear { code } => match code.as_str() {
                "NSC" => "no significant clouds".to_string(),
                "NCD" => "no clouds detected".to_string(),
                _ => "clear".to_string(),
            },
        }
    }
}

// =============================================================================
// Temperature and Pressure
// =============================================================================

/// Temperature and dew point group, e.g. `15/08`, `M02/M05`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temperature {
    pub celsius: i32,
    pub dew_point_celsius: Option<i32>,
}

impl Temperature {
    pub fn parse(token: &str) -> Option<Self> {
        let caps = TEMPERATURE_RE.captures(token)?;
        Some(Self {
            celsius: parse_signed(&caps["temp"])?,
            dew_point_celsius: caps.name("dew").and_then(|d| parse_signed(d.as_str())),
        })
    }

    pub fn describe(&self) -> String {
        format!("{:.1} C", self.celsius as f64)
    }
}

fn parse_signed(value: &str) -> Option<i32> {
    match value.strip_prefix('M') {
        Some(magnitude) => magnitude.parse::<i32>().ok().map(|v| -v),
        None => value.parse().ok(),
    }
}

/// Altimeter setting converted to hectopascals, `Q1013` or `A2992`
pub fn parse_pressure_hpa(token: &str) -> Option<f64> {
    let caps = PRESSURE_RE.captures(token)?;
    let value: f64 = caps["value"].parse().ok()?;
    match &caps["unit"] {
        "A" => Some(value / 100.0 * HPA_PER_INHG),
        _ => Some(value),
    }
}
