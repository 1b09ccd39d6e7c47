use std::{any::Any, borrow::Cow, fmt::Debug, sync::Arc};

use minapp_utils::pretty_type_name::pretty_type_name;

use crate::CompileContext;

pub type HookNoopReturn = anyhow::Result<()>;

pub type SharedPlugin = Arc<dyn Plugin>;

pub trait Plugin: Any + Debug + Send + Sync + 'static {
  fn name(&self) -> Cow<'static, str> {
    pretty_type_name::<Self>()
  }

  /// Fired once per compile pass, after the entries (and so the app config) are known and before
  /// any chunk is materialized. Plugins may still mutate the optimization slots of the options
  /// here.
  fn compile(&self, _ctx: &CompileContext<'_>) -> HookNoopReturn {
    Ok(())
  }
}
