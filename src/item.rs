/// One tag to print: its unique identifier, which ends up in the scannable code,
/// and the label shown above the code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelItem {
    pub id: String,
    pub text: String,
    /// Position of the tag in the caller's collection, starting at 0
    pub sequence_index: usize,
}

impl LabelItem {
    pub fn new<I: Into<String>, T: Into<String>>(id: I, text: T, sequence_index: usize) -> Self {
        LabelItem {
            id: id.into(),
            text: text.into(),
            sequence_index,
        }
    }

    /// Build items from `(identifier, label)` pairs, numbering them in iteration order
    pub fn from_tags<T, I, L>(tags: T) -> Vec<LabelItem>
    where
        T: IntoIterator<Item = (I, L)>,
        I: Into<String>,
        L: Into<String>,
    {
        tags.into_iter()
            .enumerate()
            .map(|(sequence_index, (id, text))| LabelItem::new(id, text, sequence_index))
            .collect()
    }
}
