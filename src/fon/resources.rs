use super::tables::*;
use crate::errors::DecodeError;
use crate::parsing::{Position, Slice, SliceIter};

/// Resource type of a bitmap or vector font (`RT_FONT | 0x8000`)
pub(crate) const FONT_RESOURCE: u16 = 0x8008;

pub(crate) struct ResourceGroup {
    pub type_id: u16,
    pub entries: Slice<ResourceNameInfo>,
}

/// The groups of an NE resource table, in table order.
///
/// Iteration ends at the zero type ID that terminates the table, or after the first error.
/// Cloning restarts from the same point.
#[derive(Clone)]
pub(crate) struct ResourceGroups<'a> {
    bytes: &'a [u8],
    next: Option<Position<ResourceTypeInfo>>,
}

impl<'a> ResourceGroups<'a> {
    pub(crate) fn new(bytes: &'a [u8], first: Position<ResourceTypeInfo>) -> Self {
        ResourceGroups {
            bytes,
            next: Some(first),
        }
    }

    fn read_group(&mut self, group: Position<ResourceTypeInfo>) -> Result<Option<ResourceGroup>, DecodeError> {
        let type_id = group.type_id().read_from(self.bytes)?;
        if type_id == 0 {
            return Ok(None);
        }
        let entries = Slice::new(group.followed_by(), group.count().read_from(self.bytes)?);
        self.next = Some(entries.followed_by());
        Ok(Some(ResourceGroup { type_id, entries }))
    }
}

impl Iterator for ResourceGroups<'_> {
    type Item = Result<ResourceGroup, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let group = self.next.take()?;
        self.read_group(group).transpose()
    }
}

/// Font resource entries across all groups, in table order.
#[derive(Clone)]
pub(crate) struct FontResources<'a> {
    groups: ResourceGroups<'a>,
    current: SliceIter<ResourceNameInfo>,
}

impl<'a> FontResources<'a> {
    pub(crate) fn new(groups: ResourceGroups<'a>) -> Self {
        FontResources {
            groups,
            current: Slice::empty().into_iter(),
        }
    }
}

impl Iterator for FontResources<'_> {
    type Item = Result<Position<ResourceNameInfo>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.next() {
                return Some(Ok(entry));
            }
            match self.groups.next()? {
                Ok(group) => {
                    if group.type_id == FONT_RESOURCE {
                        self.current = group.entries.into_iter()
                    }
                }
                Err(error) => return Some(Err(error)),
            }
        }
    }
}
