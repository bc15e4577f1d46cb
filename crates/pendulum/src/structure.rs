//! Geometry of the floating TMD structure.
//!
//! Three buoyant cylinders sit on an equilateral triangle around a central
//! tower; the pendulum hangs from the tower top. The layout is plain data so
//! any renderer or modelling tool can build the scene from it.

use std::f64::consts::TAU;

use crate::error::{Error, Result};

/// Number of buoyant cylinders around the tower.
pub const FLOAT_COUNT: usize = 3;

/// A point in scene space (metres, z up).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A named mesh primitive, centred on `location`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Primitive {
    /// Upright cylinder.
    Cylinder {
        /// Object name.
        name: String,
        /// Radius (m).
        radius: f64,
        /// Height along z (m).
        depth: f64,
        /// Centre.
        location: Point,
    },
    /// UV sphere.
    Sphere {
        /// Object name.
        name: String,
        /// Radius (m).
        radius: f64,
        /// Centre.
        location: Point,
    },
}

impl Primitive {
    /// Object name.
    pub fn name(&self) -> &str {
        match self {
            Self::Cylinder { name, .. } | Self::Sphere { name, .. } => name,
        }
    }

    /// Centre.
    pub fn location(&self) -> Point {
        match self {
            Self::Cylinder { location, .. } | Self::Sphere { location, .. } => *location,
        }
    }
}

/// Dimensions of the structure.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StructureLayout {
    /// Buoyant cylinder radius (m).
    pub float_radius: f64,
    /// Buoyant cylinder height (m).
    pub float_height: f64,
    /// Distance from the tower axis to each cylinder axis (m).
    pub float_distance: f64,
    /// Tower height above the floats (m).
    pub tower_height: f64,
    /// Tower radius (m).
    pub tower_radius: f64,
    /// Pendulum length (m).
    pub pendulum_length: f64,
    /// Pendulum bob mass (kg).
    pub pendulum_mass: f64,
    /// Bob radius (m).
    pub bob_radius: f64,
    /// Rod radius (m).
    pub rod_radius: f64,
}

impl Default for StructureLayout {
    fn default() -> Self {
        Self {
            float_radius: 1.5,
            float_height: 1.5,
            float_distance: 4.0,
            tower_height: 10.0,
            tower_radius: 0.5,
            pendulum_length: 3.5,
            pendulum_mass: 50.0,
            bob_radius: 0.3,
            rod_radius: 0.05,
        }
    }
}

impl StructureLayout {
    /// Rejects zero, negative or non-finite dimensions.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimension`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("float_radius", self.float_radius),
            ("float_height", self.float_height),
            ("float_distance", self.float_distance),
            ("tower_height", self.tower_height),
            ("tower_radius", self.tower_radius),
            ("pendulum_length", self.pendulum_length),
            ("pendulum_mass", self.pendulum_mass),
            ("bob_radius", self.bob_radius),
            ("rod_radius", self.rod_radius),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidDimension { name, value });
            }
        }
        Ok(())
    }

    /// Height of the tower centre, which is also the pendulum pivot.
    pub fn pivot_height(&self) -> f64 {
        self.float_height + self.tower_height / 2.0
    }

    /// Scene primitives: floats, tower, bob, rod.
    ///
    /// # Errors
    ///
    /// Fails when [`validate`](Self::validate) does.
    pub fn primitives(&self) -> Result<Vec<Primitive>> {
        self.validate()?;

        let mut out = Vec::with_capacity(FLOAT_COUNT + 3);
        for i in 0..FLOAT_COUNT {
            #[allow(clippy::cast_precision_loss)]
            let angle = i as f64 * (TAU / FLOAT_COUNT as f64);
            out.push(Primitive::Cylinder {
                name: format!("Buoyant_Cylinder_{}", i + 1),
                radius: self.float_radius,
                depth: self.float_height,
                location: Point::new(
                    self.float_distance * angle.cos(),
                    self.float_distance * angle.sin(),
                    self.float_height / 2.0,
                ),
            });
        }

        let tower_z = self.pivot_height();
        out.push(Primitive::Cylinder {
            name: "Central_Tower".into(),
            radius: self.tower_radius,
            depth: self.tower_height,
            location: Point::new(0.0, 0.0, tower_z),
        });
        out.push(Primitive::Sphere {
            name: "TMD_Pendulum".into(),
            radius: self.bob_radius,
            location: Point::new(0.0, 0.0, tower_z - self.pendulum_length),
        });
        out.push(Primitive::Cylinder {
            name: "Pendulum_Rod".into(),
            radius: self.rod_radius,
            depth: self.pendulum_length,
            location: Point::new(0.0, 0.0, tower_z - self.pendulum_length / 2.0),
        });
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_default_primitive_names() {
        let prims = StructureLayout::default().primitives().unwrap();
        let names: Vec<_> = prims.iter().map(Primitive::name).collect();
        assert_eq!(
            names,
            [
                "Buoyant_Cylinder_1",
                "Buoyant_Cylinder_2",
                "Buoyant_Cylinder_3",
                "Central_Tower",
                "TMD_Pendulum",
                "Pendulum_Rod",
            ]
        );
    }

    #[test]
    fn test_floats_on_triangle() {
        let layout = StructureLayout::default();
        let prims = layout.primitives().unwrap();
        for p in &prims[..FLOAT_COUNT] {
            let loc = p.location();
            let r = (loc.x * loc.x + loc.y * loc.y).sqrt();
            assert!((r - 4.0).abs() < 1e-9);
            assert!((loc.z - 0.75).abs() < TOLERANCE);
        }
        let first = prims[0].location();
        assert!((first.x - 4.0).abs() < TOLERANCE);
        assert!(first.y.abs() < TOLERANCE);
    }

    #[test]
    fn test_tower_and_pendulum_heights() {
        let layout = StructureLayout::default();
        assert!((layout.pivot_height() - 6.5).abs() < TOLERANCE);
        let prims = layout.primitives().unwrap();
        assert!((prims[4].location().z - 3.0).abs() < TOLERANCE);
        assert!((prims[5].location().z - 4.75).abs() < TOLERANCE);
        match &prims[5] {
            Primitive::Cylinder { depth, .. } => assert!((depth - 3.5).abs() < TOLERANCE),
            Primitive::Sphere { .. } => panic!("rod should be a cylinder"),
        }
        assert!(matches!(prims[4], Primitive::Sphere { .. }));
    }

    #[test]
    fn test_invalid_dimension() {
        let layout = StructureLayout {
            tower_height: 0.0,
            ..StructureLayout::default()
        };
        assert_eq!(
            layout.primitives(),
            Err(Error::InvalidDimension {
                name: "tower_height",
                value: 0.0
            })
        );

        let layout = StructureLayout {
            rod_radius: f64::NAN,
            ..StructureLayout::default()
        };
        assert!(matches!(
            layout.validate(),
            Err(Error::InvalidDimension {
                name: "rod_radius",
                ..
            })
        ));
    }
}
