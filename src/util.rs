//! Human readable byte sizes.
use anyhow::anyhow;
use byte_unit::{AdjustedByte, Byte, UnitType};

pub trait HumanBytes {
    /// Convert to the largest binary unit that keeps the value above one.
    fn human_bytes(self) -> anyhow::Result<AdjustedByte>;
}

impl HumanBytes for u64 {
    fn human_bytes(self) -> anyhow::Result<AdjustedByte> {
        Ok(Byte::from_u64(self).get_appropriate_unit(UnitType::Binary))
    }
}

impl HumanBytes for f64 {
    fn human_bytes(self) -> anyhow::Result<AdjustedByte> {
        Byte::from_f64(self)
            .ok_or(anyhow!("size {self} out of range"))
            .map(|b| b.get_appropriate_unit(UnitType::Binary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_bytes() {
        assert_eq!(format!("{:.2}", 2048u64.human_bytes().unwrap()), "2.00 KiB");
        assert_eq!(format!("{}", 10u64.human_bytes().unwrap()), "10 B");
        assert!((-1.0f64).human_bytes().is_err());
    }
}
