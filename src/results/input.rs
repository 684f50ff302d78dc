//! B-RISK input file (`input1.xml`)
//!
//! Only the room geometry is read: layer heights in the results are measured
//! from the floor, and the thermal FED calculation needs the floor plan.

use super::error::{Error, Result};

/// Geometry of a room (all dimensions in metres)
#[derive(Debug, Clone, PartialEq)]
pub struct RoomGeometry {
    /// Room number used by the `Room N` result sheets
    pub id: u32,

    /// Room description, used as the display name
    pub name: String,

    pub max_height: f64,
    pub min_height: f64,
    pub length: f64,
    pub width: f64,
}

/// Parse every `rooms/room` element of the input file
pub fn parse_rooms(xml: &str) -> Result<Vec<RoomGeometry>> {
    let xml = xml.trim_start_matches('\u{feff}');
    let doc = roxmltree::Document::parse(xml)?;

    let mut rooms = Vec::new();
    for rooms_node in doc.root_element().children().filter(|n| n.has_tag_name("rooms")) {
        for room in rooms_node.children().filter(|n| n.has_tag_name("room")) {
            rooms.push(parse_room(room)?);
        }
    }

    Ok(rooms)
}

fn parse_room(room: roxmltree::Node<'_, '_>) -> Result<RoomGeometry> {
    let id = room
        .attribute("id")
        .ok_or_else(|| Error::Input("room element without id attribute".to_string()))?;
    let id: u32 = id
        .trim()
        .parse()
        .map_err(|_| Error::Input(format!("room id \"{id}\" is not a number")))?;

    let text = |field: &str| -> Result<String> {
        room.children()
            .find(|n| n.has_tag_name(field))
            .map(|n| n.text().unwrap_or_default().trim().to_string())
            .ok_or_else(|| Error::Input(format!("room {id} has no <{field}> element")))
    };

    let number = |field: &str| -> Result<f64> {
        let value = text(field)?;
        value
            .parse()
            .map_err(|_| Error::Input(format!("room {id}: <{field}> value \"{value}\" is not a number")))
    };

    Ok(RoomGeometry {
        id,
        name: text("description")?,
        max_height: number("max_height")?,
        min_height: number("min_height")?,
        length: number("length")?,
        width: number("width")?,
    })
}
