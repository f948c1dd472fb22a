//! Common trait for catalogs of ordered descriptors.

/// Common trait for catalogs holding an immutable, sorted list of descriptors.
///
/// Every catalog keeps its descriptors in canonical order (the order used
/// for iteration and for DNA encoding) and never mutates them after
/// construction, so the whole list can be exposed as a slice.
///
/// # Example
///
/// ```
/// use pixeldna::models::LayerDescriptor;
/// use pixeldna::registry::{Catalog, LayerCatalog};
///
/// let layers = LayerCatalog::new(vec![
///     LayerDescriptor::new("hair", 150),
///     LayerDescriptor::new("body", 10),
/// ])
/// .unwrap();
///
/// assert_eq!(layers.len(), 2);
/// assert_eq!(layers.iter().next().unwrap().name, "body");
/// ```
pub trait Catalog {
    /// The descriptor type stored by the catalog.
    type Item;

    /// All descriptors in canonical order.
    fn as_slice(&self) -> &[Self::Item];

    /// Get the number of descriptors in the catalog.
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Check if the catalog is empty. Constructed catalogs never are.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over descriptors in canonical order.
    fn iter(&self) -> std::slice::Iter<'_, Self::Item> {
        self.as_slice().iter()
    }
}
