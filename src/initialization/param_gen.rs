/// A source of initial values for a layer's parameters.
///
/// Generators never run dry: a layer draws exactly as many values as it holds.
pub trait ParamGen {
    /// Draws the next parameter value.
    fn draw(&mut self) -> f32;

    /// Draws the next `n` parameter values, in order.
    fn draw_n(&mut self, n: usize) -> Vec<f32> {
        (0..n).map(|_| self.draw()).collect()
    }
}
