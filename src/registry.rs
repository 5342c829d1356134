use once_cell::sync::Lazy;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::error::ComponentError;
use crate::props::{
    BudgetBreakdownProps, ColorPaletteProps, FurnitureGridProps, RoomStyle, RoomVisualizationProps,
};

/// A component invocation decoded into its typed props. Serde is the
/// validation layer: anything the engine sends that does not fit the schema
/// fails here, before any view state is built.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentPayload {
    Room(RoomStyle, RoomVisualizationProps),
    Budget(BudgetBreakdownProps),
    Palette(ColorPaletteProps),
    Furniture(FurnitureGridProps),
}

pub struct ComponentEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: Value,
    decode: fn(&Value) -> Result<ComponentPayload, serde_json::Error>,
}

fn schema_of<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null)
}

fn decode_as<T: DeserializeOwned>(props: &Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(props.clone())
}

fn room_entry(style: RoomStyle) -> ComponentEntry {
    // One decode path per style; all four share the template-driven props.
    let (name, description, decode): (_, _, fn(&Value) -> Result<ComponentPayload, serde_json::Error>) =
        match style {
            RoomStyle::Luxury => (
                "luxury_room",
                "Interactive 3D preview of a high-end furnished room. Use for upscale design briefs.",
                |props| Ok(ComponentPayload::Room(RoomStyle::Luxury, decode_as(props)?)),
            ),
            RoomStyle::Budget => (
                "budget_room",
                "Interactive 3D preview of a cost-conscious furnished room.",
                |props| Ok(ComponentPayload::Room(RoomStyle::Budget, decode_as(props)?)),
            ),
            RoomStyle::Minimalist => (
                "minimalist_room",
                "Interactive 3D preview of a sparse, neutral furnished room.",
                |props| Ok(ComponentPayload::Room(RoomStyle::Minimalist, decode_as(props)?)),
            ),
            RoomStyle::Ar => (
                "ar_room_preview",
                "Room preview staged on an AR-style floor reticle. No model export.",
                |props| Ok(ComponentPayload::Room(RoomStyle::Ar, decode_as(props)?)),
            ),
        };
    ComponentEntry {
        name,
        description,
        schema: schema_of::<RoomVisualizationProps>(),
        decode,
    }
}

pub static REGISTRY: Lazy<Vec<ComponentEntry>> = Lazy::new(|| {
    let mut entries: Vec<ComponentEntry> = RoomStyle::iter().map(room_entry).collect();
    entries.extend([
        ComponentEntry {
            name: "budget_breakdown",
            description:
                "Pie-chart budget report with spent/total figures and per-category amounts.",
            schema: schema_of::<BudgetBreakdownProps>(),
            decode: |props| Ok(ComponentPayload::Budget(decode_as(props)?)),
        },
        ComponentEntry {
            name: "color_palette",
            description: "Named hex color swatches with usage notes.",
            schema: schema_of::<ColorPaletteProps>(),
            decode: |props| Ok(ComponentPayload::Palette(decode_as(props)?)),
        },
        ComponentEntry {
            name: "furniture_grid",
            description: "Shopping grid of furniture items with prices and vendors.",
            schema: schema_of::<FurnitureGridProps>(),
            decode: |props| Ok(ComponentPayload::Furniture(decode_as(props)?)),
        },
    ]);
    entries
});

pub fn find(name: &str) -> Option<&'static ComponentEntry> {
    REGISTRY.iter().find(|entry| entry.name == name)
}

pub fn decode(name: &str, props: &Value) -> Result<ComponentPayload, ComponentError> {
    let entry = find(name).ok_or_else(|| ComponentError::Unknown(name.to_string()))?;
    (entry.decode)(props).map_err(|source| ComponentError::InvalidProps {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registry_names_are_unique() {
        let mut names: Vec<_> = REGISTRY.iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), REGISTRY.len());
    }

    #[test]
    fn schemas_describe_required_props() {
        let entry = find("budget_breakdown").unwrap();
        let required = entry.schema["required"]
            .as_array()
            .expect("budget schema has required list");
        assert!(required.iter().any(|v| v == "total"));
        assert!(required.iter().any(|v| v == "spent"));
    }

    #[test]
    fn decode_routes_room_styles() {
        let payload = decode("budget_room", &json!({"room_name": "Den"})).unwrap();
        match payload {
            ComponentPayload::Room(style, props) => {
                assert_eq!(style, RoomStyle::Budget);
                assert_eq!(props.room_name, "Den");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_unknown_component() {
        let err = decode("hologram_wall", &json!({})).unwrap_err();
        assert!(matches!(err, ComponentError::Unknown(_)));
    }

    #[test]
    fn decode_rejects_mistyped_props() {
        let err = decode("budget_breakdown", &json!({"total": "lots", "spent": 10})).unwrap_err();
        assert!(matches!(err, ComponentError::InvalidProps { .. }));
    }
}
