/// One compiled script module's mutable global data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptModule {
    pub name: String,
    pub data: Vec<u8>,
}

/// Script VM state that outlives any single room: the main script's globals
/// plus one data block per loaded module.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptRuntime {
    pub global_data: Vec<u8>,
    pub modules: Vec<ScriptModule>,
}
