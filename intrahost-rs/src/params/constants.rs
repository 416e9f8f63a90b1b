///////////////////////////////////////////////////////////////////////////////
// Parameter names, looked up once per disease
///////////////////////////////////////////////////////////////////////////////

pub const NAME: &str = "name";
pub const PROB_SYMPTOMATIC: &str = "symp";
pub const DAYS_LATENT: &str = "days_latent";
pub const DAYS_ASYMP: &str = "days_asymp";
pub const DAYS_SYMP: &str = "days_symp";
pub const INFECTION_MODEL: &str = "infection_model";
pub const INTRA_HOST_MODEL: &str = "intra_host_model";

// Fixed infectivity model
pub const SYMP_INFECTIVITY: &str = "symp_infectivity";
pub const ASYMP_INFECTIVITY: &str = "asymp_infectivity";

// Heterogeneous infectivity model
pub const HETERO_DISTRIBUTION: &str = "hetero_infectivity_distribution";
pub const HETERO_ASYMP_MULTIPLIER: &str = "hetero_infectivity_asymp_multiplier";
pub const HETERO_LOCATION_MAP: &str = "hetero_infectivity_location_map";
pub const HETERO_SCALE_MAP: &str = "hetero_infectivity_scale_map";
