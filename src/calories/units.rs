pub const LBS_TO_KG: f64 = 0.453592;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Minutes,
    Hours,
    Seconds,
}

impl DurationUnit {
    /// Unknown or missing units are read as minutes.
    pub fn parse(unit: Option<&str>) -> Self {
        match unit.map(|u| u.trim().to_lowercase()).as_deref() {
            Some("hours" | "hr") => Self::Hours,
            Some("seconds" | "sec") => Self::Seconds,
            _ => Self::Minutes,
        }
    }

    pub fn to_hours(self, value: f64) -> f64 {
        match self {
            Self::Minutes => value / 60.0,
            Self::Hours => value,
            Self::Seconds => value / 3600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Pounds,
    Kilograms,
}

impl WeightUnit {
    /// A missing unit means pounds; unrecognised text means kilograms.
    pub fn parse(unit: Option<&str>) -> Self {
        match unit.map(|u| u.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("lbs" | "lb" | "pounds") => Self::Pounds,
            _ => Self::Kilograms,
        }
    }

    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            Self::Pounds => value * LBS_TO_KG,
            Self::Kilograms => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_units_convert_to_hours() {
        assert_eq!(DurationUnit::parse(Some("minutes")).to_hours(120.0), 2.0);
        assert_eq!(DurationUnit::parse(Some("hours")).to_hours(2.0), 2.0);
        assert_eq!(DurationUnit::parse(Some("seconds")).to_hours(7200.0), 2.0);
        assert_eq!(DurationUnit::parse(Some("fortnights")).to_hours(45.0), 0.75);
    }

    #[test]
    fn duration_unit_aliases_are_case_insensitive() {
        assert_eq!(DurationUnit::parse(Some("MIN")), DurationUnit::Minutes);
        assert_eq!(DurationUnit::parse(Some("Hr")), DurationUnit::Hours);
        assert_eq!(DurationUnit::parse(Some(" Sec ")), DurationUnit::Seconds);
        assert_eq!(DurationUnit::parse(None), DurationUnit::Minutes);
        assert_eq!(DurationUnit::parse(Some("")), DurationUnit::Minutes);
    }

    #[test]
    fn weight_units_convert_to_kg() {
        let kg = WeightUnit::parse(Some("lbs")).to_kg(220.0);
        assert!((kg - 99.79024).abs() < 1e-9);
        assert_eq!(WeightUnit::parse(Some("kg")).to_kg(100.0), 100.0);
        assert_eq!(WeightUnit::parse(Some("Kilograms")).to_kg(80.0), 80.0);
    }

    #[test]
    fn weight_unit_fallbacks() {
        assert_eq!(WeightUnit::parse(Some("Pounds")), WeightUnit::Pounds);
        assert_eq!(WeightUnit::parse(Some("LB")), WeightUnit::Pounds);
        assert_eq!(WeightUnit::parse(Some("stone")), WeightUnit::Kilograms);
        assert_eq!(WeightUnit::parse(None), WeightUnit::Pounds);
    }
}
