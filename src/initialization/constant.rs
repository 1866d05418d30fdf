use super::ParamGen;

/// Initializes every parameter to the same value.
#[derive(Debug, Clone, Copy)]
pub struct ConstParamGen(f32);

impl ConstParamGen {
    pub fn new(value: f32) -> Self {
        Self(value)
    }
}

impl ParamGen for ConstParamGen {
    fn draw(&mut self) -> f32 {
        self.0
    }
}
