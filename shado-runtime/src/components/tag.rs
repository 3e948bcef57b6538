use crate::component::ComponentView;
use crate::entity::EntityRef;
use crate::error::ShadoResult;

use super::TagComponent;

impl ComponentView<TagComponent> {
    pub fn tag(&self) -> ShadoResult<String> {
        EntityRef::fetch_tag(self.entity().non_null()?)
    }

    pub fn set_tag(&self, tag: &str) -> ShadoResult<()> {
        EntityRef::store_tag(self.entity().non_null()?, tag)
    }
}
