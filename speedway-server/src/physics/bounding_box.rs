use glam::DVec3;

#[derive(Copy, Clone, Debug)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl BoundingBox {
    pub fn new(
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
        min_z: f64,
        max_z: f64,
    ) -> BoundingBox {
        BoundingBox {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    pub fn from_center_halflength(center: DVec3, halflength: DVec3) -> BoundingBox {
        BoundingBox {
            min_x: center.x - halflength.x,
            max_x: center.x + halflength.x,
            min_y: center.y - halflength.y,
            max_y: center.y + halflength.y,
            min_z: center.z - halflength.z,
            max_z: center.z + halflength.z,
        }
    }

    pub fn pos(&self) -> DVec3 {
        DVec3::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    pub fn collides_with(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
            && self.min_z <= other.max_z
            && other.min_z <= self.max_z
    }
}
