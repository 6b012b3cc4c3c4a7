//! Room design generation for a customer's selected products.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_database::store::{ProductStore, RoomDesignStore};
use atelier_entity::product::PlacementType;
use atelier_entity::room_design::{CreateRoomDesign, RoomDesign};
use atelier_entity::user::Identity;

use super::generator::{ImageGenerator, ImageRequest};
use crate::context::RequestContext;

/// What the customer wants visualized.
#[derive(Debug, Clone)]
pub struct DesignBrief {
    pub product_ids: Vec<Uuid>,
    pub room_type: String,
    pub theme: String,
    pub style: String,
}

#[derive(Clone)]
pub struct RoomDesignService {
    designs: Arc<dyn RoomDesignStore>,
    products: Arc<dyn ProductStore>,
    generator: Arc<dyn ImageGenerator>,
}

impl RoomDesignService {
    /// Creates a new room design service.
    pub fn new(
        designs: Arc<dyn RoomDesignStore>,
        products: Arc<dyn ProductStore>,
        generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            designs,
            products,
            generator,
        }
    }

    /// Renders one image for the brief and stores a design per product,
    /// all sharing that image. Returns the first design.
    pub async fn generate(
        &self,
        ctx: &RequestContext,
        brief: DesignBrief,
    ) -> Result<RoomDesign, AppError> {
        let customer_id = ctx.require_customer()?;
        if brief.product_ids.is_empty() {
            return Err(AppError::validation("Select at least one product"));
        }

        let products = self.products.find_many(&brief.product_ids).await?;
        if products.is_empty() {
            return Err(AppError::not_found("Products not found"));
        }
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();

        let image_url = self
            .generator
            .generate(&ImageRequest {
                prompt: build_prompt(&brief, &names),
            })
            .await?;

        let designs = self
            .designs
            .create_many(
                products
                    .iter()
                    .map(|p| CreateRoomDesign {
                        customer_id,
                        product_id: p.id,
                        room_type: brief.room_type.clone(),
                        theme: brief.theme.clone(),
                        style: brief.style.clone(),
                        placement_type: PlacementType::Floor,
                        image_url: image_url.clone(),
                    })
                    .collect(),
            )
            .await?;

        info!(customer_id = %customer_id, designs = designs.len(), "Room design generated");
        designs
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal("No design stored"))
    }

    /// The customer's saved designs.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        customer_id: Uuid,
    ) -> Result<Vec<RoomDesign>, AppError> {
        ctx.ensure_is(Identity::customer(customer_id))?;
        self.designs.list_by_customer(customer_id).await
    }
}

fn build_prompt(brief: &DesignBrief, product_names: &[&str]) -> String {
    format!(
        "A luxurious {} interior design in {} style with {} theme, featuring {}, \
         high-end furniture and elegant decor, photorealistic, professional interior photography",
        brief.room_type,
        brief.style,
        brief.theme,
        product_names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use atelier_core::ErrorKind;

    use super::*;
    use crate::testing::Fixture;

    #[derive(Default)]
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl ImageGenerator for RecordingGenerator {
        async fn generate(&self, request: &ImageRequest) -> Result<String, AppError> {
            if self.fail {
                return Err(AppError::external_service("upstream down"));
            }
            self.prompts.lock().unwrap().push(request.prompt.clone());
            Ok("https://images.example/room.png".to_string())
        }
    }

    fn brief(product_ids: Vec<Uuid>) -> DesignBrief {
        DesignBrief {
            product_ids,
            room_type: "living room".to_string(),
            theme: "warm earth".to_string(),
            style: "art deco".to_string(),
        }
    }

    #[tokio::test]
    async fn test_one_design_per_product_sharing_image() {
        let fx = Fixture::new();
        let generator = Arc::new(RecordingGenerator::default());
        let service = fx.room_designs(generator.clone());
        let customer = Uuid::new_v4();
        let lamp = fx.product(Uuid::new_v4(), "Tiffany Lamp", "1500").await;
        let sofa = fx.product(Uuid::new_v4(), "Velvet Sofa", "60000").await;

        let first = service
            .generate(&fx.customer(customer), brief(vec![lamp.id, sofa.id]))
            .await
            .unwrap();
        assert_eq!(first.image_url, "https://images.example/room.png");
        assert_eq!(first.placement_type, PlacementType::Floor);

        let all = service.list(&fx.customer(customer), customer).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|d| d.image_url == first.image_url));

        let prompt = generator.prompts.lock().unwrap()[0].clone();
        assert!(prompt.starts_with("A luxurious living room interior design in art deco style with warm earth theme"));
        assert!(prompt.contains("Tiffany Lamp"));
        assert!(prompt.contains("Velvet Sofa"));
    }

    #[tokio::test]
    async fn test_failures() {
        let fx = Fixture::new();
        let customer = fx.customer(Uuid::new_v4());
        let lamp = fx.product(Uuid::new_v4(), "Lamp", "100").await;

        let empty = fx
            .room_designs(Arc::new(RecordingGenerator::default()))
            .generate(&customer, brief(vec![]))
            .await
            .unwrap_err();
        assert_eq!(empty.kind, ErrorKind::Validation);

        let upstream = fx
            .room_designs(Arc::new(RecordingGenerator {
                fail: true,
                ..RecordingGenerator::default()
            }))
            .generate(&customer, brief(vec![lamp.id]))
            .await
            .unwrap_err();
        assert_eq!(upstream.kind, ErrorKind::ExternalService);
    }
}
