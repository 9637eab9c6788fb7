use crate::entity::Attributes;
use crate::prelude::{LocatorError, LocatorResult};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder(Vec<String>),
}

/// Compiled `{{ key }}` template. Placeholders name attributes directly;
/// dotted paths (`coords.lat`) reach into nested objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> LocatorResult<Self> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let body = &rest[start + 2..];
            let end = body.find("}}").ok_or_else(|| LocatorError::Template {
                offset: offset + start,
                reason: "unterminated placeholder".into(),
            })?;
            let key = body[..end].trim();
            if key.is_empty() || key.split('.').any(str::is_empty) {
                return Err(LocatorError::Template {
                    offset: offset + start,
                    reason: format!("invalid placeholder `{}`", &body[..end]),
                });
            }
            segments.push(Segment::Placeholder(
                key.split('.').map(str::to_string).collect(),
            ));
            let consumed = start + 2 + end + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Interpolates `attributes`; unknown keys and nulls render as nothing.
    pub fn render(&self, attributes: &Attributes) -> String {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Placeholder(path) => {
                    if let Some(value) = lookup(attributes, path) {
                        push_value(&mut output, value);
                    }
                }
            }
        }
        output
    }

    pub fn placeholders(&self) -> impl Iterator<Item = String> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(path) => Some(path.join(".")),
            Segment::Literal(_) => None,
        })
    }
}

fn lookup<'a>(attributes: &'a Attributes, path: &[String]) -> Option<&'a Value> {
    let (first, tail) = path.split_first()?;
    let mut current = attributes.get(first)?;
    for key in tail {
        current = current.as_object()?.get(key)?;
    }
    Some(current)
}

fn push_value(output: &mut String, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(text) => output.push_str(text),
        other => output.push_str(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attributes(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn renders_flat_and_nested_keys() {
        let template = Template::parse("{{ name }} @ {{coords.lat}},{{coords.lng}}").unwrap();
        let rendered = template.render(&attributes(json!({
            "name": "LRV-1",
            "coords": {"lat": 10.5, "lng": 20}
        })));
        assert_eq!(rendered, "LRV-1 @ 10.5,20");
    }

    #[test]
    fn missing_and_null_values_render_empty() {
        let template = Template::parse("[{{model}}|{{power_level_percent}}|{{a.b}}]").unwrap();
        let rendered = template.render(&attributes(json!({"power_level_percent": null})));
        assert_eq!(rendered, "[||]");
    }

    #[test]
    fn unterminated_placeholder_reports_offset() {
        match Template::parse("ok {{name") {
            Err(LocatorError::Template { offset, .. }) => assert_eq!(offset, 3),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_placeholder_is_rejected() {
        assert!(Template::parse("{{ }}").is_err());
        assert!(Template::parse("{{coords.}}").is_err());
    }

    #[test]
    fn lists_placeholders_in_order() {
        let template = Template::parse("{{name}} {{coords.lat}}").unwrap();
        let keys: Vec<String> = template.placeholders().collect();
        assert_eq!(keys, vec!["name", "coords.lat"]);
    }
}
