//! Error types for body creation, shapes, the registry and configuration.

use thiserror::Error;

use crate::systems::collider::ShapeKind;

/// Errors when constructing a shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// Polygons need at least three vertices.
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// Polygon vertices enclose no area.
    #[error("polygon has zero area")]
    ZeroArea,

    /// Radius must be positive and finite.
    #[error("invalid circle radius {0}")]
    InvalidRadius(f32),

    /// Half extents must be positive and finite.
    #[error("invalid box half extents ({0}, {1})")]
    InvalidExtents(f32, f32),

    /// A half-plane needs a non-zero normal.
    #[error("half-plane normal must be non-zero")]
    ZeroNormal,
}

/// Errors when creating a rigid body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyError {
    /// Dynamic bodies need finite, strictly positive mass.
    #[error("dynamic body mass must be finite and > 0, got {0}")]
    DegenerateMass(f32),

    /// Dynamic bodies need finite, strictly positive moment of inertia.
    #[error("dynamic body moment of inertia must be finite and > 0, got {0}")]
    DegenerateInertia(f32),

    /// No inertia was given and none can be derived from this shape.
    #[error("cannot derive moment of inertia from a {0:?} collider")]
    NoInertiaForShape(ShapeKind),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Errors from registry operations on handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The handle no longer refers to a live value.
    #[error("stale or unknown handle {0}")]
    StaleHandle(u64),

    /// The value is already registered in a bucket.
    #[error("handle {0} is already in a bucket")]
    AlreadyBucketed(u64),
}

/// Errors when loading configuration or scene JSON.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid gravity ({0}, {1})")]
    InvalidGravity(f32, f32),

    #[error("body {index}: {source}")]
    Body {
        index: usize,
        #[source]
        source: BodyError,
    },

    #[error("trigger {index}: {source}")]
    Trigger {
        index: usize,
        #[source]
        source: ShapeError,
    },
}
