use crate::chart::style::{deep_merge, StyleError, StyleOverlay};

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Title {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), extra: Map::new() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Font {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Chart layout in plotly's key naming. Keys without a typed field are kept
/// in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    #[serde(deserialize_with = "pixels")]
    pub height: u32,
    #[serde(default, deserialize_with = "opt_pixels", skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colorway: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Layout {
    pub fn new(title: impl Into<String>, height: u32) -> Self {
        Self {
            title: Title::new(title),
            height,
            width: None,
            font: None,
            paper_bgcolor: None,
            plot_bgcolor: None,
            colorway: None,
            margin: None,
            showlegend: None,
            xaxis: None,
            yaxis: None,
            extra: Map::new(),
        }
    }

    /// Deep merges `overlay` on top of this layout, see
    /// [`crate::chart::style::deep_merge`] for the rules. The layout is left
    /// unchanged if the merged document no longer describes a valid layout.
    pub fn merge(&mut self, overlay: &StyleOverlay) -> Result<(), StyleError> {
        if overlay.is_empty() {
            return Ok(());
        }
        let mut merged = serde_json::to_value(&*self).map_err(StyleError::Invalid)?;
        deep_merge(&mut merged, &Value::Object(overlay.as_map().clone()));
        *self = serde_json::from_value(merged).map_err(StyleError::Invalid)?;
        Ok(())
    }

    pub fn merged(mut self, overlay: &StyleOverlay) -> Result<Self, StyleError> {
        self.merge(overlay)?;
        Ok(self)
    }
}

// plotly takes any positive number for sizes, fractions are rounded
fn to_pixels<E: de::Error>(v: f64) -> Result<u32, E> {
    if !v.is_finite() || v < 1. || v > u32::MAX as f64 {
        return Err(E::custom(format!("invalid size in pixels: {v}")));
    }
    Ok(v.round() as u32)
}

fn pixels<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    to_pixels(f64::deserialize(d)?)
}

fn opt_pixels<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Option::<f64>::deserialize(d)?.map(to_pixels).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn overlay(v: Value) -> StyleOverlay {
        match v {
            Value::Object(map) => StyleOverlay::from(map),
            _ => panic!("overlay must be an object"),
        }
    }

    #[test]
    fn test_serialize_skips_unset() {
        let layout = Layout::new("fit", 700);
        assert_eq!(
            serde_json::to_value(&layout).unwrap(),
            json!({"title": {"text": "fit"}, "height": 700})
        );
    }

    #[test]
    fn test_merge_keeps_title_and_overrides_height() {
        let layout = Layout::new("fit", 700)
            .merged(&overlay(json!({"height": 500, "font": {"family": "Courier New"}})))
            .unwrap();

        assert_eq!(layout.title.text, "fit");
        assert_eq!(layout.height, 500);
        assert_eq!(layout.font.unwrap().family.as_deref(), Some("Courier New"));
    }

    #[test]
    fn test_merge_nested_font() {
        let mut layout = Layout::new("fit", 700);
        layout.font = Some(Font { size: Some(12.), color: Some("#000".into()), ..Font::default() });
        layout.merge(&overlay(json!({"font": {"size": 18}}))).unwrap();

        let font = layout.font.unwrap();
        assert_eq!(font.size, Some(18.));
        assert_eq!(font.color.as_deref(), Some("#000"));
    }

    #[test]
    fn test_merge_title_object_keeps_text() {
        let layout =
            Layout::new("fit", 700).merged(&overlay(json!({"title": {"x": 0.5}}))).unwrap();

        assert_eq!(layout.title.text, "fit");
        assert_eq!(layout.title.extra["x"], json!(0.5));
    }

    #[test]
    fn test_merge_passes_unknown_keys_through() {
        let layout = Layout::new("fit", 700)
            .merged(&overlay(json!({"hovermode": "closest", "legend": {"orientation": "h"}})))
            .unwrap();

        let value = serde_json::to_value(&layout).unwrap();
        assert_eq!(value["hovermode"], json!("closest"));
        assert_eq!(value["legend"], json!({"orientation": "h"}));
    }

    #[test]
    fn test_merge_axis_title_shorthand() {
        let layout =
            Layout::new("fit", 700).merged(&overlay(json!({"xaxis": {"title": "x"}}))).unwrap();

        assert_eq!(layout.xaxis.unwrap().title.unwrap().text, "x");
    }

    #[test]
    fn test_merge_float_sizes() {
        let layout = Layout::new("fit", 700)
            .merged(&overlay(json!({"height": 650.0, "width": 899.6})))
            .unwrap();

        assert_eq!(layout.height, 650);
        assert_eq!(layout.width, Some(900));
    }

    #[test]
    fn test_merge_rejects_non_positive_size() {
        let mut layout = Layout::new("fit", 700);

        let zero = layout.merge(&overlay(json!({"height": 0})));
        let negative = layout.merge(&overlay(json!({"width": -5.5})));

        assert!(matches!(zero, Err(StyleError::Invalid(_))));
        assert!(matches!(negative, Err(StyleError::Invalid(_))));
        assert_eq!(layout, Layout::new("fit", 700));
    }

    #[test]
    fn test_merge_invalid_leaves_layout() {
        let mut layout = Layout::new("fit", 700);
        let res = layout.merge(&overlay(json!({"height": "tall"})));

        assert!(matches!(res, Err(StyleError::Invalid(_))));
        assert_eq!(layout, Layout::new("fit", 700));
    }
}
