//! Greengrass recipe templates: loading, shape validation, and rendering.
//!
//! Two templates ship with the tool: one for the SFC main service and one for
//! every other module. Templates are parsed once per run and validated against
//! the fixed shape this tool overwrites (`Manifests[0].Lifecycle.Install.Script`,
//! `Manifests[0].Lifecycle.Run.Script`, `Manifests[0].Artifacts[0].URI`) so a
//! broken template fails with a named error before any recipe is written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::AppError;
use crate::modules::Module;

/// Template filename for the SFC main service recipe.
pub const MAIN_TEMPLATE_FILE: &str = "sfc-main-recipe.json.template";

/// Template filename for generic module recipes.
pub const MODULE_TEMPLATE_FILE: &str = "sfc-module-recipe.json.template";

/// Which of the two recipe templates a document was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// The SFC main service; always started, reads its config from a file.
    Main,
    /// Any other module; only started when IPC mode is enabled.
    Generic,
}

/// A validated recipe template.
///
/// The underlying document keeps every template field verbatim; rendering
/// only overwrites the component identity, lifecycle scripts, and artifact
/// URI.
#[derive(Debug, Clone)]
pub struct RecipeTemplate {
    kind: TemplateKind,
    path: PathBuf,
    doc: Value,
}

/// Required template shape, checked once at load time.
#[derive(Debug, Deserialize)]
struct RecipeShape {
    #[serde(rename = "Manifests")]
    manifests: Vec<ManifestShape>,
}

#[derive(Debug, Deserialize)]
struct ManifestShape {
    #[serde(rename = "Lifecycle")]
    #[allow(dead_code)]
    lifecycle: LifecycleShape,
    #[serde(rename = "Artifacts")]
    artifacts: Vec<ArtifactShape>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct LifecycleShape {
    #[serde(rename = "Install")]
    install: ScriptShape,
    #[serde(rename = "Run")]
    run: ScriptShape,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ScriptShape {
    #[serde(rename = "Script")]
    script: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ArtifactShape {
    #[serde(rename = "URI")]
    uri: String,
}

impl RecipeTemplate {
    /// Load and validate a template file.
    pub fn load(path: &Path, kind: TemplateKind) -> Result<Self, AppError> {
        if !path.is_file() {
            return Err(AppError::TemplateNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let doc: Value = serde_json::from_str(&content).map_err(|e| AppError::TemplateParse {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        validate_shape(&doc, path)?;
        Ok(Self { kind, path: path.to_path_buf(), doc })
    }

    /// Render the recipe document for one module.
    pub fn render(&self, config: &Config, module: &Module) -> Result<Value, AppError> {
        let mut doc = self.doc.clone();

        let obj = doc.as_object_mut().ok_or_else(|| self.shape_error("not a JSON object"))?;
        obj.insert(
            "ComponentName".to_string(),
            Value::String(config.component_name(&module.name)),
        );
        obj.insert(
            "ComponentVersion".to_string(),
            Value::String(config.component_version.clone()),
        );
        obj.insert(
            "ComponentDescription".to_string(),
            Value::String(format!("SFC {} module", module.name)),
        );

        self.set_pointer(
            &mut doc,
            "/Manifests/0/Lifecycle/Install/Script",
            install_script(&module.file_name),
        )?;
        self.set_pointer(
            &mut doc,
            "/Manifests/0/Lifecycle/Run/Script",
            run_script(self.kind, &module.name),
        )?;
        self.set_pointer(
            &mut doc,
            "/Manifests/0/Artifacts/0/URI",
            config.artifact_uri(&module.name, &module.file_name),
        )?;

        Ok(doc)
    }

    fn set_pointer(&self, doc: &mut Value, pointer: &str, value: String) -> Result<(), AppError> {
        match doc.pointer_mut(pointer) {
            Some(slot) => {
                *slot = Value::String(value);
                Ok(())
            }
            None => Err(self.shape_error(&format!("missing {pointer}"))),
        }
    }

    fn shape_error(&self, reason: &str) -> AppError {
        AppError::TemplateShape { path: self.path.clone(), reason: reason.to_string() }
    }
}

fn validate_shape(doc: &Value, path: &Path) -> Result<(), AppError> {
    let shape_error = |reason: String| AppError::TemplateShape { path: path.to_path_buf(), reason };

    let shape: RecipeShape =
        serde_json::from_value(doc.clone()).map_err(|e| shape_error(e.to_string()))?;

    if shape.manifests.is_empty() {
        return Err(shape_error("Manifests is empty".to_string()));
    }
    if shape.manifests[0].artifacts.is_empty() {
        return Err(shape_error("Manifests[0].Artifacts is empty".to_string()));
    }
    Ok(())
}

/// Both recipe templates, loaded once per run.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    main: RecipeTemplate,
    generic: RecipeTemplate,
}

impl TemplateSet {
    /// Load both templates from the resources directory.
    pub fn load(resources_dir: &Path) -> Result<Self, AppError> {
        Ok(Self {
            main: RecipeTemplate::load(&resources_dir.join(MAIN_TEMPLATE_FILE), TemplateKind::Main)?,
            generic: RecipeTemplate::load(
                &resources_dir.join(MODULE_TEMPLATE_FILE),
                TemplateKind::Generic,
            )?,
        })
    }

    /// Select the template matching a module.
    pub fn for_module(&self, module: &Module) -> &RecipeTemplate {
        if module.is_main() { &self.main } else { &self.generic }
    }
}

/// Install script: unpack the artifact in place.
fn install_script(file_name: &str) -> String {
    format!("cd {{artifacts:path}} && tar -xvf {file_name}")
}

/// Run script: the main service always starts with a decoded config file; a
/// generic module only starts its own process when IPC mode is enabled.
fn run_script(kind: TemplateKind, module: &str) -> String {
    match kind {
        TemplateKind::Main => format!(
            "printf '{{configuration:/SFC_CONFIG_JSON}}' > {{artifacts:path}}/conf.json && \
             {{artifacts:path}}/{module}/bin/{module} -config {{artifacts:path}}/conf.json"
        ),
        TemplateKind::Generic => format!(
            "if $IPC_MODE; then {{artifacts:path}}/{module}/bin/{module} -port \
             {{configuration:/ipc_port}}; fi"
        ),
    }
}

/// Serialize a recipe document as 4-space-indented JSON, overwriting any
/// existing file unconditionally.
pub fn write_recipe(path: &Path, doc: &Value) -> Result<(), AppError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser).map_err(io::Error::other)?;
    fs::write(path, buf)?;
    Ok(())
}
