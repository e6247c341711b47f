//! Symbols and symbol tables.

use bitflags::bitflags;
use fillcheck_parser::NodeIndex;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Handle to a `Symbol` in a `SymbolArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

bitflags! {
    /// What introduced a symbol. A name declared twice in one scope carries
    /// the union of both declarations' flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SymbolFlags: u32 {
        /// `var` declaration, or the implicit `arguments`.
        const FUNCTION_SCOPED_VARIABLE = 1 << 0;
        /// `let` declaration.
        const BLOCK_SCOPED_VARIABLE = 1 << 1;
        /// `const` declaration.
        const CONST = 1 << 2;
        const PARAMETER = 1 << 3;
        const CATCH_VARIABLE = 1 << 4;
        const FUNCTION = 1 << 5;
        const CLASS = 1 << 6;
        const IMPORT = 1 << 7;

        const VARIABLE = Self::FUNCTION_SCOPED_VARIABLE.bits()
            | Self::BLOCK_SCOPED_VARIABLE.bits()
            | Self::CONST.bits();
        /// Bindings that may be assigned again after initialization.
        const REASSIGNABLE = Self::FUNCTION_SCOPED_VARIABLE.bits()
            | Self::BLOCK_SCOPED_VARIABLE.bits()
            | Self::PARAMETER.bits()
            | Self::CATCH_VARIABLE.bits();
    }
}

/// A declared name.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub flags: SymbolFlags,
    /// Declaration nodes in source order. Usually a single entry.
    pub declarations: SmallVec<[NodeIndex; 1]>,
    /// First declaration node.
    pub value_declaration: NodeIndex,
    /// Initializer of the first declaration when its name is a plain
    /// identifier (`const x = init`). `NONE` for parameters, bare `let x;`,
    /// destructured names, functions, classes and imports.
    pub initializer: NodeIndex,
}

impl Symbol {
    #[inline]
    pub fn has_flag(&self, flag: SymbolFlags) -> bool {
        self.flags.intersects(flag)
    }
}

/// Owner of every symbol created while binding one file.
#[derive(Clone, Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, flags: SymbolFlags, name: String) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            name,
            flags,
            declarations: SmallVec::new(),
            value_declaration: NodeIndex::NONE,
            initializer: NodeIndex::NONE,
        });
        id
    }

    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| (SymbolId(i as u32), symbol))
    }
}

/// Name to symbol map for one scope.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: FxHashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name).copied()
    }

    pub fn set(&mut self, name: String, id: SymbolId) {
        self.symbols.insert(name, id);
    }

    #[inline]
    pub fn has(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SymbolId)> {
        self.symbols.iter()
    }
}
