use super::CombineService;

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    combine_service: CombineService,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn combine_service(&self) -> &CombineService {
        &self.combine_service
    }
}
