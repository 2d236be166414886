#![forbid(unsafe_code)]

//! Navigation seam.
//!
//! The menu decides *when* to navigate; the host decides *how*. Routers,
//! history APIs, and test recorders all plug in through [`Navigator`].

/// Receives navigation requests as absolute paths, e.g.
/// `/categories/sneakers`.
pub trait Navigator {
    fn navigate_to(&mut self, path: &str);
}

/// Closures are navigators, which keeps tests and small hosts free of
/// adapter types.
impl<F: FnMut(&str)> Navigator for F {
    fn navigate_to(&mut self, path: &str) {
        self(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_implement_navigator() {
        let mut seen = Vec::new();
        let mut navigator = |path: &str| seen.push(path.to_owned());
        navigator.navigate_to("/categories/boots");
        assert_eq!(seen, ["/categories/boots"]);
    }
}
