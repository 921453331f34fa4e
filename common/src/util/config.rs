use serde::Deserialize;

/// The named constants from the router's external interface, plus the
/// (supplemental) net-ordering strategy choice. Loaded from a TOML file by
/// the CLI; falls back to these defaults when the file is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    #[serde(default = "default_via_cost")]
    pub via_cost: u32,
    #[serde(default = "default_wrong_direction_cost")]
    pub wrong_direction_cost: u32,
    #[serde(default = "default_congestion_weight")]
    pub congestion_weight: u32,
    #[serde(default = "default_max_rip_up_iterations")]
    pub max_rip_up_iterations: u32,
    #[serde(default = "default_max_grid_size")]
    pub max_grid_size: u32,
    #[serde(default = "default_rng_seed")]
    pub rng_seed: u64,
    #[serde(default)]
    pub orderer: OrdererConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            via_cost: default_via_cost(),
            wrong_direction_cost: default_wrong_direction_cost(),
            congestion_weight: default_congestion_weight(),
            max_rip_up_iterations: default_max_rip_up_iterations(),
            max_grid_size: default_max_grid_size(),
            rng_seed: default_rng_seed(),
            orderer: OrdererConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrdererConfig {
    #[serde(default = "default_orderer_strategy")]
    pub strategy: String,
}

impl Default for OrdererConfig {
    fn default() -> Self {
        Self {
            strategy: default_orderer_strategy(),
        }
    }
}

fn default_via_cost() -> u32 {
    10
}

fn default_wrong_direction_cost() -> u32 {
    2
}

fn default_congestion_weight() -> u32 {
    2
}

fn default_max_rip_up_iterations() -> u32 {
    5
}

fn default_max_grid_size() -> u32 {
    1000
}

fn default_rng_seed() -> u64 {
    0xC0FFEE
}

fn default_orderer_strategy() -> String {
    "length".to_string()
}
