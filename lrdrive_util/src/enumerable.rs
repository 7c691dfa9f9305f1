/// A closed set of symbols that can be densely indexed.
/// `index` must be in `0..Self::count()` and `enumerate` must yield the members in index order,
/// tables use it to address their columns.
pub trait Enumerable : Sized + Copy {
    type Iterator: Iterator<Item = Self> + std::iter::ExactSizeIterator;

    fn index(&self) -> usize;

    fn enumerate() -> Self::Iterator;

    fn count() -> usize {
        Self::enumerate().len()
    }
}
