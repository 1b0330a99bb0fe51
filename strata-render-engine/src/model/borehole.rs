use bevy::prelude::*;

/// A named drilling location. Coordinates carry two decimals of precision.
#[derive(Debug, Clone, PartialEq)]
pub struct Borehole {
    pub id: u64,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Borehole {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Round to two decimal places, the precision borehole records are kept at.
pub fn round_to_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Ordered borehole records. Boreholes are only ever appended or removed.
#[derive(Resource, Debug, Clone, Default)]
pub struct BoreholeRegistry {
    boreholes: Vec<Borehole>,
    next_id: u64,
}

impl BoreholeRegistry {
    pub fn boreholes(&self) -> &[Borehole] {
        &self.boreholes
    }

    pub fn len(&self) -> usize {
        self.boreholes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boreholes.is_empty()
    }

    /// Default name offered when placing the next borehole.
    pub fn suggested_name(&self) -> String {
        format!("BH-{}", self.boreholes.len() + 1)
    }

    /// Record a borehole at `point`. Blank names are refused.
    pub fn add(&mut self, name: &str, point: Vec3) -> Option<&Borehole> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.boreholes.push(Borehole {
            id,
            name: name.to_string(),
            x: round_to_hundredths(point.x),
            y: round_to_hundredths(point.y),
            z: round_to_hundredths(point.z),
        });
        info!("Borehole '{}' placed at {:.2}, {:.2}, {:.2}", name, point.x, point.y, point.z);
        self.boreholes.last()
    }

    pub fn remove(&mut self, id: u64) -> Option<Borehole> {
        let index = self.boreholes.iter().position(|b| b.id == id)?;
        Some(self.boreholes.remove(index))
    }

    pub fn clear(&mut self) {
        self.boreholes.clear();
    }
}
