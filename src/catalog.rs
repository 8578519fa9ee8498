use crate::error::CatalogError;
use ahash::AHashMap;
use itertools::Itertools;

/// Host-registered description of one node kind.
///
/// `parent: None` marks a direct child of the implicit base kind; abstract
/// kinds group their descendants in the palette and are never instantiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindDescriptor {
    pub is_abstract: bool,
    pub parent: Option<String>,
}

impl KindDescriptor {
    pub fn concrete() -> Self {
        Self {
            is_abstract: false,
            parent: None,
        }
    }

    pub fn abstract_kind() -> Self {
        Self {
            is_abstract: true,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// One row of the creation-palette index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub tag: String,
    pub depth: usize,
    pub is_abstract: bool,
    pub parent: Option<String>,
}

/// The explicit registry of node kinds a host offers for creation.
///
/// Kinds form a tree under an implicit base; the host registers every kind
/// once at startup instead of relying on runtime discovery, and the palette
/// is derived from the registered tree.
#[derive(Debug, Clone, Default)]
pub struct NodeCatalog {
    kinds: AHashMap<String, KindDescriptor>,
}

impl NodeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a kind, replacing any earlier registration of the same tag.
    pub fn register_kind(&mut self, tag: impl Into<String>, descriptor: KindDescriptor) {
        self.kinds.insert(tag.into(), descriptor);
    }

    pub fn descriptor(&self, tag: &str) -> Result<&KindDescriptor, CatalogError> {
        self.kinds.get(tag).ok_or_else(|| CatalogError::UnknownKind {
            tag: tag.to_string(),
        })
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.kinds.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Palette depth of a kind. The base occupies depth 1, so a direct child
    /// sits at depth 2, a grandchild at 3 and so on.
    pub fn depth(&self, tag: &str) -> Result<usize, CatalogError> {
        let mut depth = 2;
        let mut seen = vec![tag];
        let mut current = self.descriptor(tag)?;
        while let Some(parent) = current.parent.as_deref() {
            if seen.contains(&parent) {
                return Err(CatalogError::CyclicKind {
                    tag: tag.to_string(),
                });
            }
            seen.push(parent);
            current = self.descriptor(parent)?;
            depth += 1;
        }
        Ok(depth)
    }

    /// Direct concrete descendants of a kind, sorted by tag.
    pub fn concrete_children(&self, tag: &str) -> Result<Vec<String>, CatalogError> {
        self.descriptor(tag)?;
        Ok(self
            .kinds
            .iter()
            .filter(|(_, descriptor)| {
                descriptor.parent.as_deref() == Some(tag) && !descriptor.is_abstract
            })
            .map(|(child, _)| child.clone())
            .sorted()
            .collect())
    }

    /// Builds the creation-palette index: a deterministic pre-order walk from
    /// the base with children sorted by tag, so every parent is listed before
    /// its children. Fails when a parent chain leaves the registry or cycles.
    pub fn build_index(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        // Resolving every depth up front also rejects detached chains and
        // cycles before any entry is emitted.
        for tag in self.kinds.keys() {
            self.depth(tag)?;
        }

        let mut entries = Vec::with_capacity(self.kinds.len());
        let mut stack: Vec<(&str, usize)> = self
            .children_of(None)
            .into_iter()
            .rev()
            .map(|tag| (tag, 2))
            .collect();
        while let Some((tag, depth)) = stack.pop() {
            let descriptor = self.descriptor(tag)?;
            entries.push(CatalogEntry {
                tag: tag.to_string(),
                depth,
                is_abstract: descriptor.is_abstract,
                parent: descriptor.parent.clone(),
            });
            for child in self.children_of(Some(tag)).into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        Ok(entries)
    }

    fn children_of(&self, parent: Option<&str>) -> Vec<&str> {
        self.kinds
            .iter()
            .filter(|(_, descriptor)| descriptor.parent.as_deref() == parent)
            .map(|(tag, _)| tag.as_str())
            .sorted()
            .collect()
    }
}
