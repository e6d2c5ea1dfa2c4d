use crate::advisory::Advisor;

pub struct Data {
    pub advisor: Advisor,
}

impl Data {
    pub fn new(advisor: Advisor) -> Self {
        Self { advisor }
    }
}
