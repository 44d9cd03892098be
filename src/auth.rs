//! Admin credential checks.

/// Decides whether a presented admin key grants access.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, presented: Option<&str>) -> bool;
}

/// Grants access to callers presenting one fixed shared key.
pub struct SharedSecret {
    key: String,
}

impl SharedSecret {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Authorizer for SharedSecret {
    fn authorize(&self, presented: Option<&str>) -> bool {
        match presented {
            Some(presented) => {
                // constant time over equal-length keys
                presented.len() == self.key.len()
                    && presented
                        .bytes()
                        .zip(self.key.bytes())
                        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                        == 0
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_secret() {
        let auth = SharedSecret::new("admin123");
        assert!(auth.authorize(Some("admin123")));
        assert!(!auth.authorize(Some("admin12")));
        assert!(!auth.authorize(Some("admin1234")));
        assert!(!auth.authorize(Some("ADMIN123")));
        assert!(!auth.authorize(None));
    }

    #[test]
    fn test_empty_secret_rejects_missing_key() {
        let auth = SharedSecret::new("");
        assert!(!auth.authorize(None));
        assert!(auth.authorize(Some("")));
    }
}
