//! Block catalog: validated block definitions and the registry that loads
//! them from JSON.

mod builtin;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Error, Result, SchemaError};
use crate::resolve::{self, ResolvedParameters};
use crate::schema::{self, BlockDefinition, RawValues};
use crate::validate::validate_block;

pub const TRACING_TARGET: &str = "blockform::catalog";

static BUILTIN: OnceLock<BlockRegistry> = OnceLock::new();

/// A block definition that passed schema validation.
#[derive(Debug, Clone)]
pub struct Block {
    definition: BlockDefinition,
}

impl Block {
    pub fn new(definition: BlockDefinition) -> Result<Self> {
        let errors = validate_block(&definition);
        if !errors.is_empty() {
            tracing::error!(
                target: TRACING_TARGET,
                block = %definition.id,
                errors = errors.len(),
                "Rejected block definition"
            );
            return Err(Error::Schema(errors));
        }
        Ok(Block { definition })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Block::new(schema::parse(json)?)
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    pub fn resolve(&self, values: &RawValues) -> Result<ResolvedParameters> {
        Ok(resolve::resolve(&self.definition, values)?)
    }

    pub fn active_fields(&self, values: &RawValues) -> BTreeSet<String> {
        resolve::resolve_visibility(&self.definition.fields, values)
    }

    pub fn required_fields(&self, values: &RawValues) -> BTreeSet<String> {
        let active = self.active_fields(values);
        resolve::required_fields(&self.definition.fields, values, &active)
    }
}

/// Registered blocks keyed by block id.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    blocks: BTreeMap<String, Block>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the bundled integration blocks.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for json in builtin::DEFINITIONS {
            registry.register_json(json)?;
        }
        Ok(registry)
    }

    /// Process-wide [`BlockRegistry::builtin`], built on first use.
    pub fn shared_builtin() -> Result<&'static Self> {
        if let Some(registry) = BUILTIN.get() {
            return Ok(registry);
        }
        let registry = Self::builtin()?;
        Ok(BUILTIN.get_or_init(|| registry))
    }

    pub fn register(&mut self, block: Block) -> Result<()> {
        if self.blocks.contains_key(block.id()) {
            return Err(Error::Schema(vec![SchemaError::new(
                "S014",
                format!("Block '{}' is already registered", block.id()),
                None,
            )]));
        }
        tracing::info!(
            target: TRACING_TARGET,
            block = block.id(),
            fields = block.definition().fields.len(),
            operations = block.definition().operations.entries.len(),
            "Registered block"
        );
        self.blocks.insert(block.id().to_string(), block);
        Ok(())
    }

    pub fn register_json(&mut self, json: &str) -> Result<()> {
        self.register(Block::from_json(json)?)
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.register_json(&json)
    }

    /// Register every `*.json` file in `dir`, in file name order.
    /// Returns the number of blocks registered.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        let io_error = |source: std::io::Error| Error::Io {
            path: dir.display().to_string(),
            source,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            self.load_file(path)?;
        }
        Ok(paths.len())
    }

    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
