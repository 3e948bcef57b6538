use crate::api::api;
use crate::buffers::{read_string, str_arg};
use crate::component::ComponentView;
use crate::error::ShadoResult;
use crate::traits::Component;

use super::ScriptComponent;

impl ComponentView<ScriptComponent> {
    /// Name of the script type the host instantiates for this entity.
    pub fn class_name(&self) -> ShadoResult<String> {
        let id = self.entity().non_null()?;
        read_string(ScriptComponent::KIND.name(), |buf, len, out| unsafe {
            ((*api().script).get_class_name)(id, buf, len, out)
        })
    }

    pub fn set_class_name(&self, name: &str) -> ShadoResult<()> {
        let (ptr, len) = str_arg(name);
        self.write(|id| unsafe { ((*api().script).set_class_name)(id, ptr, len) })
    }
}

#[cfg(test)]
mod tests {
    use crate::components::ScriptComponent;
    use crate::test_support::{setup, spawn};

    #[test]
    fn class_name_round_trips() {
        let _guard = setup();
        let script = spawn("s").add_component::<ScriptComponent>().unwrap();
        script.set_class_name("Sandbox.Player").unwrap();
        assert_eq!(script.class_name().unwrap(), "Sandbox.Player");
    }
}
