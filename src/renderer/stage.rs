//! Camera Stage Definitions
//!
//! `CameraStage` names the fixed steps a single camera goes through, in
//! execution order. The camera renderer traces each stage on entry and
//! reports the stage at which a camera was skipped.

/// Per-camera render stage.
///
/// | Stage | Purpose |
/// |-------|---------|
/// | `Setup` | Bind the G-buffer set as the active render targets |
/// | `Cull` | Request culling parameters and results from the host |
/// | `Begin` | Camera properties, clear, open the profiling scope |
/// | `GeometryPass` | Draw opaque `gbuffer`-tagged renderers into the G-buffer |
/// | `UniformUpload` | Global G-buffer textures and view-projection matrices |
/// | `LightingPass` | Full-screen lighting blit into the camera target |
/// | `SkyAndOverlay` | Skybox, then editor gizmos when requested |
/// | `End` | Close the profiling scope, flush, submit |
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
#[repr(u8)]
pub enum CameraStage {
    Setup = 0,
    Cull = 1,
    Begin = 2,
    GeometryPass = 3,
    UniformUpload = 4,
    LightingPass = 5,
    SkyAndOverlay = 6,
    End = 7,
}

impl CameraStage {
    pub const ALL: [Self; 8] = [
        Self::Setup,
        Self::Cull,
        Self::Begin,
        Self::GeometryPass,
        Self::UniformUpload,
        Self::LightingPass,
        Self::SkyAndOverlay,
        Self::End,
    ];

    /// Returns the numeric index of the stage (used for sorting).
    #[inline]
    #[must_use]
    pub const fn order(self) -> u8 {
        self as u8
    }

    /// Stage name (for debugging).
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Setup => "Setup",
            Self::Cull => "Cull",
            Self::Begin => "Begin",
            Self::GeometryPass => "GeometryPass",
            Self::UniformUpload => "UniformUpload",
            Self::LightingPass => "LightingPass",
            Self::SkyAndOverlay => "SkyAndOverlay",
            Self::End => "End",
        }
    }
}

impl std::fmt::Display for CameraStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_ordering() {
        for pair in CameraStage::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} must precede {}", pair[0], pair[1]);
        }
        assert!(CameraStage::GeometryPass < CameraStage::UniformUpload);
        assert!(CameraStage::UniformUpload < CameraStage::LightingPass);
    }
}
