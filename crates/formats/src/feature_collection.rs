use foundation::geo::LatLng;
use serde_json::{Map, Value};

/// One renderable point. MultiPoint features expand into one `PointFeature`
/// per position, all sharing the same properties.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub position: LatLng,
}

impl PointFeature {
    /// Property rendered as label text, if it is set to something truthy.
    ///
    /// Empty strings, `0`, `false` and `null` count as unset.
    pub fn label(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<PointFeature>,
    /// Features with no geometry or a geometry that is not point-like.
    pub skipped: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum FeatureCollectionError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected GeoJSON FeatureCollection")]
    NotAFeatureCollection,
    #[error("invalid feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },
}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, FeatureCollectionError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, FeatureCollectionError> {
        let obj = value
            .as_object()
            .ok_or(FeatureCollectionError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(FeatureCollectionError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(FeatureCollectionError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(FeatureCollectionError::NotAFeatureCollection)?;

        let mut out = FeatureCollection::default();
        for (index, feat_val) in features_val.iter().enumerate() {
            let invalid = |reason: String| FeatureCollectionError::InvalidFeature { index, reason };

            let feat_obj = feat_val
                .as_object()
                .ok_or_else(|| invalid("feature must be an object".to_string()))?;

            let feat_type = feat_obj
                .get("type")
                .and_then(|v| v.as_str())
                .ok_or_else(|| invalid("feature missing type".to_string()))?;
            if feat_type != "Feature" {
                return Err(invalid(format!("unexpected feature type: {feat_type}")));
            }

            let id = match feat_obj.get("id") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };

            let properties = feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();

            // Unlocated features are skipped, not rejected.
            let geometry_val = match feat_obj.get("geometry") {
                None | Some(Value::Null) => {
                    out.skipped += 1;
                    continue;
                }
                Some(v) => v,
            };

            match parse_points(geometry_val).map_err(invalid)? {
                Some(points) => {
                    out.features.extend(points.into_iter().map(|position| PointFeature {
                        id: id.clone(),
                        properties: properties.clone(),
                        position,
                    }));
                }
                None => out.skipped += 1,
            }
        }

        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// `Ok(None)` for well-formed geometries that are not points.
fn parse_points(v: &Value) -> Result<Option<Vec<LatLng>>, String> {
    let obj = v
        .as_object()
        .ok_or_else(|| "geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "geometry missing type".to_string())?;

    match ty {
        "Point" => {
            let coords = obj
                .get("coordinates")
                .ok_or_else(|| "Point missing coordinates".to_string())?;
            Ok(Some(vec![parse_position(coords)?]))
        }
        "MultiPoint" => {
            let coords = obj
                .get("coordinates")
                .and_then(|v| v.as_array())
                .ok_or_else(|| "MultiPoint coordinates must be an array".to_string())?;
            let points = coords
                .iter()
                .map(parse_position)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(points))
        }
        "LineString" | "MultiLineString" | "Polygon" | "MultiPolygon" | "GeometryCollection" => {
            Ok(None)
        }
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_position(v: &Value) -> Result<LatLng, String> {
    let arr = v
        .as_array()
        .ok_or_else(|| "position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have at least 2 elements".to_string());
    }
    let lon = arr[0]
        .as_f64()
        .ok_or_else(|| "position lon must be a number".to_string())?;
    let lat = arr[1]
        .as_f64()
        .ok_or_else(|| "position lat must be a number".to_string())?;
    let p = LatLng::from_lon_lat(lon, lat);
    if !p.is_valid() {
        return Err(format!("position out of range: [{lon}, {lat}]"));
    }
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::{FeatureCollection, FeatureCollectionError};
    use foundation::geo::LatLng;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_named_points() {
        let fc = FeatureCollection::from_geojson_str(
            r#"{
              "type": "FeatureCollection",
              "features": [
                { "type": "Feature", "id": 3, "properties": { "name": "Mural" },
                  "geometry": { "type": "Point", "coordinates": [11.25, 43.77] } },
                { "type": "Feature",
                  "geometry": { "type": "Point", "coordinates": [11.26, 43.78, 50.0] } }
              ]
            }"#,
        )
        .expect("parse");

        assert_eq!(fc.len(), 2);
        assert_eq!(fc.features[0].id.as_deref(), Some("3"));
        assert_eq!(fc.features[0].position, LatLng::new(43.77, 11.25));
        assert_eq!(fc.features[0].label("name").as_deref(), Some("Mural"));
        assert_eq!(fc.features[1].label("name"), None);
        assert_eq!(fc.skipped, 0);
    }

    #[test]
    fn multipoint_expands_and_lines_are_skipped() {
        let fc = FeatureCollection::from_geojson_str(
            r#"{
              "type": "FeatureCollection",
              "features": [
                { "type": "Feature", "properties": { "name": "Pair" },
                  "geometry": { "type": "MultiPoint", "coordinates": [[1, 2], [3, 4]] } },
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "LineString", "coordinates": [[1, 2], [3, 4]] } }
              ]
            }"#,
        )
        .expect("parse");

        assert_eq!(fc.len(), 2);
        assert_eq!(fc.features[1].position, LatLng::new(4.0, 3.0));
        assert_eq!(fc.features[1].label("name").as_deref(), Some("Pair"));
        assert_eq!(fc.skipped, 1);
    }

    #[test]
    fn falsy_labels_count_as_unset() {
        let fc = FeatureCollection::from_geojson_str(
            r#"{ "type": "FeatureCollection", "features": [
                { "type": "Feature", "properties": { "name": "" },
                  "geometry": { "type": "Point", "coordinates": [0, 0] } },
                { "type": "Feature", "properties": { "name": 0 },
                  "geometry": { "type": "Point", "coordinates": [0, 0] } },
                { "type": "Feature", "properties": { "name": 42 },
                  "geometry": { "type": "Point", "coordinates": [0, 0] } }
            ] }"#,
        )
        .expect("parse");

        let labels: Vec<_> = fc.features.iter().map(|f| f.label("name")).collect();
        assert_eq!(labels, vec![None, None, Some("42".to_string())]);
    }

    #[test]
    fn rejects_non_collections() {
        let err = FeatureCollection::from_geojson_str(r#"{ "type": "Feature" }"#).unwrap_err();
        assert!(matches!(err, FeatureCollectionError::NotAFeatureCollection));

        let err = FeatureCollection::from_geojson_str("not json").unwrap_err();
        assert!(matches!(err, FeatureCollectionError::Json(_)));
    }

    #[test]
    fn reports_the_offending_feature() {
        let err = FeatureCollection::from_geojson_str(
            r#"{ "type": "FeatureCollection", "features": [
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [0, 0] } },
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": ["x", 0] } }
            ] }"#,
        )
        .unwrap_err();

        match err {
            FeatureCollectionError::InvalidFeature { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("lon"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unlocated_features_are_skipped() {
        let fc = FeatureCollection::from_geojson_str(
            r#"{ "type": "FeatureCollection", "features": [
                { "type": "Feature", "properties": { "name": "Garden" },
                  "geometry": { "type": "Point", "coordinates": [11.25, 43.77] } },
                { "type": "Feature", "properties": { "name": "Nowhere" }, "geometry": null },
                { "type": "Feature", "properties": { "name": "Unset" } }
            ] }"#,
        )
        .expect("parse");

        assert_eq!(fc.len(), 1);
        assert_eq!(fc.features[0].label("name").as_deref(), Some("Garden"));
        assert_eq!(fc.skipped, 2);
    }
}
