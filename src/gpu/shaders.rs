//! WGSL assets and their composition into pipeline sources.
//!
//! Each asset lives as a file under the configured shader directory and is
//! also embedded in the binary. Files are read once at startup; a file that
//! cannot be read is reported and its embedded copy is used instead.

use std::fs;
use std::path::Path;

use crate::error::ShaderError;
use crate::particle::MAX_PARTICLES;

/// The WGSL files that make up the renderer's shaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderAsset {
    /// Shared uniform block.
    Common,
    /// Line and point vertex/fragment stages.
    Emitter,
    /// Quad expansion vertex stage.
    Billboard,
    /// Flat disc fragment stage.
    BillboardFlat,
    /// Scalar-field fragment stage.
    Fluid,
}

impl ShaderAsset {
    pub const ALL: [ShaderAsset; 5] = [
        ShaderAsset::Common,
        ShaderAsset::Emitter,
        ShaderAsset::Billboard,
        ShaderAsset::BillboardFlat,
        ShaderAsset::Fluid,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ShaderAsset::Common => "common.wgsl",
            ShaderAsset::Emitter => "emitter.wgsl",
            ShaderAsset::Billboard => "billboard.wgsl",
            ShaderAsset::BillboardFlat => "billboard_flat.wgsl",
            ShaderAsset::Fluid => "fluid.wgsl",
        }
    }

    /// The copy compiled into the binary.
    pub fn embedded(self) -> &'static str {
        match self {
            ShaderAsset::Common => include_str!("../../shaders/common.wgsl"),
            ShaderAsset::Emitter => include_str!("../../shaders/emitter.wgsl"),
            ShaderAsset::Billboard => include_str!("../../shaders/billboard.wgsl"),
            ShaderAsset::BillboardFlat => include_str!("../../shaders/billboard_flat.wgsl"),
            ShaderAsset::Fluid => include_str!("../../shaders/fluid.wgsl"),
        }
    }

    /// Read this asset from `dir`.
    pub fn read_from(self, dir: &Path) -> Result<String, ShaderError> {
        let path = dir.join(self.file_name());
        fs::read_to_string(&path).map_err(|source| ShaderError::Read { path, source })
    }
}

/// Source text for every asset, loaded once.
#[derive(Debug, Clone)]
pub struct ShaderLibrary {
    sources: [String; 5],
}

impl ShaderLibrary {
    /// Library made of the embedded sources only.
    pub fn embedded() -> Self {
        Self {
            sources: ShaderAsset::ALL.map(|asset| asset.embedded().to_string()),
        }
    }

    /// Read every asset from `dir`.
    ///
    /// Assets that fail to read fall back to their embedded copy; the read
    /// errors are returned alongside so the caller can report them.
    pub fn load(dir: &Path) -> (Self, Vec<ShaderError>) {
        let mut errors = Vec::new();
        let sources = ShaderAsset::ALL.map(|asset| match asset.read_from(dir) {
            Ok(source) => source,
            Err(e) => {
                errors.push(e);
                asset.embedded().to_string()
            }
        });
        (Self { sources }, errors)
    }

    pub fn source(&self, asset: ShaderAsset) -> &str {
        &self.sources[asset as usize]
    }

    fn compose(&self, stages: &[ShaderAsset]) -> String {
        let mut out = format!("const PARTICLE_COUNT: u32 = {}u;\n\n", MAX_PARTICLES);
        out.push_str(self.source(ShaderAsset::Common));
        for stage in stages {
            out.push('\n');
            out.push_str(self.source(*stage));
        }
        out
    }

    /// Lines and points.
    pub fn emitter_source(&self) -> String {
        self.compose(&[ShaderAsset::Emitter])
    }

    /// Flat billboards.
    pub fn billboard_source(&self) -> String {
        self.compose(&[ShaderAsset::Billboard, ShaderAsset::BillboardFlat])
    }

    /// Shaded scalar field, used by both linear and default modes.
    pub fn fluid_source(&self) -> String {
        self.compose(&[ShaderAsset::Billboard, ShaderAsset::Fluid])
    }
}

/// Create a shader module, capturing validation errors instead of panicking.
pub fn compile(
    device: &wgpu::Device,
    name: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(name),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    match pollster::block_on(device.pop_error_scope()) {
        None => Ok(module),
        Some(error) => Err(ShaderError::Compile {
            name: name.to_string(),
            message: error.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(())
    }

    fn entry_points(code: &str) -> Vec<String> {
        let module = naga::front::wgsl::parse_str(code).expect("parses");
        module.entry_points.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_emitter_source_is_valid() {
        let library = ShaderLibrary::embedded();
        let source = library.emitter_source();

        validate_wgsl(&source).expect("emitter WGSL should be valid");
        assert_eq!(entry_points(&source), vec!["vs_main", "fs_main"]);
    }

    #[test]
    fn test_billboard_source_is_valid() {
        let library = ShaderLibrary::embedded();
        let source = library.billboard_source();

        validate_wgsl(&source).expect("billboard WGSL should be valid");
        assert!(source.contains("smoothstep"));
    }

    #[test]
    fn test_fluid_source_is_valid() {
        let library = ShaderLibrary::embedded();
        let source = library.fluid_source();

        validate_wgsl(&source).expect("fluid WGSL should be valid");
        assert!(source.contains(&format!("PARTICLE_COUNT: u32 = {}u", MAX_PARTICLES)));
    }

    #[test]
    fn test_load_from_shader_dir() {
        let dir = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders"));
        let (library, errors) = ShaderLibrary::load(&dir);

        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        for asset in ShaderAsset::ALL {
            assert_eq!(library.source(asset), asset.embedded());
        }
    }

    #[test]
    fn test_missing_dir_falls_back_to_embedded() {
        let dir = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/no-such-shader-dir"));
        let (library, errors) = ShaderLibrary::load(&dir);

        assert_eq!(errors.len(), ShaderAsset::ALL.len());
        assert!(errors
            .iter()
            .all(|e| matches!(e, ShaderError::Read { .. })));
        assert_eq!(
            library.source(ShaderAsset::Fluid),
            ShaderAsset::Fluid.embedded()
        );
    }
}
