use crate::variables::WorldVariables;

/// Something that wants to run once per frame, after the frame is presented.
pub trait Updateable {
    fn update(&mut self, vars: &WorldVariables);
}

/// Ordered list of per-frame updateables.
#[derive(Default)]
pub struct UpdateCollector {
    items: Vec<Box<dyn Updateable>>,
}

impl UpdateCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Box<dyn Updateable>) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Run every updateable in registration order.
    pub fn update_all(&mut self, vars: &WorldVariables) {
        for item in &mut self.items {
            item.update(vars);
        }
    }
}

impl std::fmt::Debug for UpdateCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateCollector")
            .field("items", &self.items.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        seen: Rc<RefCell<Vec<f64>>>,
    }

    impl Updateable for Recorder {
        fn update(&mut self, vars: &WorldVariables) {
            self.seen.borrow_mut().push(vars.tick());
        }
    }

    #[test]
    fn update_all_runs_each_item() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut collector = UpdateCollector::new();
        collector.add(Box::new(Recorder { seen: seen.clone() }));
        collector.add(Box::new(Recorder { seen: seen.clone() }));
        assert_eq!(collector.len(), 2);

        let mut vars = WorldVariables::new();
        vars.set_tick(std::time::Duration::from_millis(500));
        collector.update_all(&vars);
        assert_eq!(*seen.borrow(), vec![0.5, 0.5]);
    }
}
