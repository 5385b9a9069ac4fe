use crate::common::error::AppError;

/// Um DELETE que não afetou nenhuma linha significa que o registro não existia.
pub(crate) fn ensure_deleted(rows_affected: u64, entity: &'static str) -> Result<(), AppError> {
    if rows_affected == 0 {
        return Err(AppError::NotFound(entity));
    }
    Ok(())
}

/// `true` se algum item aparece mais de uma vez.
pub(crate) fn has_duplicates<T: PartialEq>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .any(|(i, item)| items[..i].contains(item))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rows_is_not_found() {
        assert!(matches!(ensure_deleted(0, "empresa"), Err(AppError::NotFound("empresa"))));
        assert!(ensure_deleted(1, "empresa").is_ok());
    }

    #[test]
    fn detects_repeated_items() {
        assert!(has_duplicates(&[1, 2, 1]));
        assert!(!has_duplicates(&[1, 2, 3]));
        assert!(!has_duplicates::<u8>(&[]));
    }
}
