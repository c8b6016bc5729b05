//! UUID v4 generator behind the [`IdGenerator`] port.

use uuid::Uuid;

use crate::domain::ports::IdGenerator;

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct_v4_uuids() {
        let generator = UuidGenerator;
        let first = generator.generate();
        let second = generator.generate();
        assert_ne!(first, second);
        assert_eq!(first.get_version_num(), 4);
    }
}
