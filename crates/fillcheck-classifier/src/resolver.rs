//! The identifier-resolution seam the classifier consumes.

use fillcheck_binder::{ArenaResolver, Binding, ResolveError};
use fillcheck_parser::NodeIndex;

/// Maps an identifier reference to the declaration that introduces it.
///
/// `Ok(None)` means the name has no declaration in scope (a global such as
/// `Array`). Errors are treated as "not found" by the classifier.
pub trait BindingResolver {
    fn resolve_identifier(&self, ident: NodeIndex) -> Result<Option<Binding>, ResolveError>;
}

impl BindingResolver for ArenaResolver<'_> {
    #[inline]
    fn resolve_identifier(&self, ident: NodeIndex) -> Result<Option<Binding>, ResolveError> {
        self.resolve(ident)
    }
}

impl<R: BindingResolver + ?Sized> BindingResolver for &R {
    #[inline]
    fn resolve_identifier(&self, ident: NodeIndex) -> Result<Option<Binding>, ResolveError> {
        (**self).resolve_identifier(ident)
    }
}
