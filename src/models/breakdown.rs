use serde::{Deserialize, Serialize};

/// Itemised synastry score, keyed the way the UI and commentary consume it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub core: CoreBreakdown,
    pub secondary: SecondaryBreakdown,
    pub lang: LangBreakdown,
    #[serde(default, with = "empty_object")]
    pub houses: Option<HouseBreakdown>,
    #[serde(default)]
    pub angles: AngleBreakdown,
    pub raw: f64,
}

/// Luminary aspects, unscaled, plus the Moon weighting applied to them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreBreakdown {
    #[serde(rename = "Sun-Sun")]
    pub sun_sun: i32,
    #[serde(rename = "Moon-Moon")]
    pub moon_moon: i32,
    #[serde(rename = "Sun-Moon(A→B)")]
    pub sun_moon_ab: i32,
    #[serde(rename = "Sun-Moon(B→A)")]
    pub sun_moon_ba: i32,
    pub moon_factor: f64,
}

impl CoreBreakdown {
    /// Sum of the three Moon-involving terms before weighting
    pub fn moon_terms(&self) -> i32 {
        self.moon_moon + self.sun_moon_ab + self.sun_moon_ba
    }

    /// Moon terms after the uncertainty factor
    pub fn weighted_moon_terms(&self) -> f64 {
        self.moon_factor * self.moon_terms() as f64
    }

    pub fn total(&self) -> f64 {
        self.sun_sun as f64 + self.weighted_moon_terms()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryBreakdown {
    #[serde(rename = "Venus→Mars")]
    pub venus_mars: i32,
    #[serde(rename = "Mars→Venus")]
    pub mars_venus: i32,
    pub same_sun_element: i32,
}

impl SecondaryBreakdown {
    pub fn total(&self) -> i32 {
        self.venus_mars + self.mars_venus + self.same_sun_element
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangBreakdown {
    pub primary: i32,
    pub secondary: i32,
}

impl LangBreakdown {
    pub fn total(&self) -> i32 {
        self.primary + self.secondary
    }
}

/// House modality class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    Angular,
    Succedent,
    Cadent,
}

/// Modality of each Sun's house in its own chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunModality {
    #[serde(rename = "A")]
    pub a: Option<Modality>,
    #[serde(rename = "B")]
    pub b: Option<Modality>,
    pub bonus: i32,
}

/// House overlay placements as 1-based house numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseBreakdown {
    #[serde(rename = "A.Sun→B.house")]
    pub a_sun_in_b: Option<u8>,
    #[serde(rename = "A.Moon→B.house")]
    pub a_moon_in_b: Option<u8>,
    #[serde(rename = "B.Sun→A.house")]
    pub b_sun_in_a: Option<u8>,
    #[serde(rename = "B.Moon→A.house")]
    pub b_moon_in_a: Option<u8>,
    pub sun_modality: SunModality,
    pub house_bonus_total: i32,
}

/// Matched angle contacts; unmatched pairs are omitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleBreakdown {
    #[serde(rename = "Sun(A)↔ASC(B)", default, skip_serializing_if = "Option::is_none")]
    pub sun_a_asc_b: Option<i32>,
    #[serde(rename = "Sun(B)↔ASC(A)", default, skip_serializing_if = "Option::is_none")]
    pub sun_b_asc_a: Option<i32>,
    #[serde(rename = "Moon(A)↔ASC(B)", default, skip_serializing_if = "Option::is_none")]
    pub moon_a_asc_b: Option<i32>,
    #[serde(rename = "Moon(B)↔ASC(A)", default, skip_serializing_if = "Option::is_none")]
    pub moon_b_asc_a: Option<i32>,
    #[serde(rename = "ASC↔ASC", default, skip_serializing_if = "Option::is_none")]
    pub asc_asc: Option<i32>,
    #[serde(rename = "Sun(A)↔MC(B)", default, skip_serializing_if = "Option::is_none")]
    pub sun_a_mc_b: Option<i32>,
    #[serde(rename = "Sun(B)↔MC(A)", default, skip_serializing_if = "Option::is_none")]
    pub sun_b_mc_a: Option<i32>,
    #[serde(rename = "MC↔MC", default, skip_serializing_if = "Option::is_none")]
    pub mc_mc: Option<i32>,
}

impl AngleBreakdown {
    /// Matched terms in display order
    pub fn entries(&self) -> Vec<(&'static str, i32)> {
        [
            ("Sun(A)↔ASC(B)", self.sun_a_asc_b),
            ("Sun(B)↔ASC(A)", self.sun_b_asc_a),
            ("Moon(A)↔ASC(B)", self.moon_a_asc_b),
            ("Moon(B)↔ASC(A)", self.moon_b_asc_a),
            ("ASC↔ASC", self.asc_asc),
            ("Sun(A)↔MC(B)", self.sun_a_mc_b),
            ("Sun(B)↔MC(A)", self.sun_b_mc_a),
            ("MC↔MC", self.mc_mc),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }

    pub fn total(&self) -> i32 {
        self.entries().iter().map(|(_, v)| v).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// `None` is written as `{}` and read back from `{}` or `null`
mod empty_object {
    use serde::de::{DeserializeOwned, Error as _};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match &value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Object(map) if map.is_empty() => Ok(None),
            _ => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
        }
    }
}
