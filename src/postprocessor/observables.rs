use nalgebra::RealField;

#[derive(Clone, Copy, Debug, PartialEq)]
/// The observables at a single energy
pub struct ObservableSample<T> {
    /// The energy `ω` of the sample
    pub energy: T,
    /// `-Im G^R_11 / π`
    pub density_of_states: T,
    /// `Σ_jk Γ_L(j) |G^R_jk|^2 Γ_R(k)`
    pub transmission: T,
    /// The transmission in units of `e^2 / h`
    pub conductance: T,
    /// The spectral current density
    pub current: T,
    /// `|G^R_11|^2`
    pub g_tilde: T,
    /// The diagonal element of the spectral function on the dot
    pub spectral_dot: T,
    /// The diagonal element of the spectral function on the Majorana mode
    pub spectral_majorana: T,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Observables integrated over the energy grid, and extrema of the spectral diagnostics
pub struct IntegratedObservables<T> {
    /// `∫ DOS dω`
    pub density_of_states: T,
    /// `∫ T dω`
    pub transmission: T,
    /// `∫ G dω`
    pub conductance: T,
    /// `∫ I dω`
    pub current: T,
    /// The smallest value of `A_11` on the grid
    pub minimum_spectral_dot: T,
    /// The smallest value of `A_22` on the grid
    pub minimum_spectral_majorana: T,
}

impl<T: Copy + RealField> IntegratedObservables<T> {
    /// Whether both diagonal spectral weights stay above `-tolerance` everywhere on the grid
    pub fn spectral_weight_is_positive(&self, tolerance: T) -> bool {
        (self.minimum_spectral_dot >= -tolerance) & (self.minimum_spectral_majorana >= -tolerance)
    }
}
