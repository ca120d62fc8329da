/// Reference policies shown next to the generated ESG insights.
pub const ESG_POLICIES: [&str; 4] = [
    "SDG 7.2: Increase substantially the share of renewable energy in the global energy mix.",
    "SDG 7.3: Double the global rate of improvement in energy efficiency.",
    "ESG Reporting: Carbon Disclosure Project (CDP) alignment.",
    "ISO 50001: Energy Management Systems standards.",
];

/// Campus target for grid dependency reduction (%).
pub const GRID_REDUCTION_TARGET_PERCENT: f64 = 35.0;
