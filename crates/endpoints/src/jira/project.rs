use atlassian_rest_api::{HttpMethod, Params, Result, Transport};
use serde_json::Value;

use crate::{segment, user_or_group};

const ENDPOINT: &str = "project";

/// Projects, their avatars, components, statuses, versions, properties and roles.
pub struct ProjectEndpoint<'a, T: Transport + ?Sized> {
    client: &'a mut T,
}

impl<'a, T: Transport + ?Sized> ProjectEndpoint<'a, T> {
    pub fn new(client: &'a mut T) -> Self {
        Self { client }
    }

    fn path(project: &str, rest: &str) -> String {
        if rest.is_empty() {
            format!("{ENDPOINT}/{}", segment(project))
        } else {
            format!("{ENDPOINT}/{}/{rest}", segment(project))
        }
    }

    async fn get(&mut self, path: String) -> Result<Value> {
        self.client
            .call_endpoint(&path, Params::new(), HttpMethod::Get)
            .await
    }

    /// All projects visible to the current user (or to anonymous access).
    pub async fn find_all(&mut self) -> Result<Value> {
        self.get(ENDPOINT.to_string()).await
    }

    pub async fn find(&mut self, project: &str) -> Result<Value> {
        self.get(Self::path(project, "")).await
    }

    /// Turns the temporary avatar into the project's avatar.
    pub async fn convert_avatar(
        &mut self,
        project: &str,
        cropper_width: u32,
        cropper_offset_x: u32,
        cropper_offset_y: u32,
        needs_cropping: bool,
    ) -> Result<Value> {
        let params = Params::new()
            .with("cropperWidth", cropper_width)
            .with("cropperOffsetX", cropper_offset_x)
            .with("cropperOffsetY", cropper_offset_y)
            .with("needsCropping", needs_cropping);
        self.client
            .call_endpoint(&Self::path(project, "avatar"), params, HttpMethod::Post)
            .await
    }

    pub async fn delete_avatar(&mut self, project: &str, avatar_id: &str) -> Result<Value> {
        let path = Self::path(project, &format!("avatar/{}", segment(avatar_id)));
        self.client
            .call_endpoint(&path, Params::new(), HttpMethod::Delete)
            .await
    }

    pub async fn find_avatars(&mut self, project: &str) -> Result<Value> {
        self.get(Self::path(project, "avatars")).await
    }

    pub async fn find_components(&mut self, project: &str) -> Result<Value> {
        self.get(Self::path(project, "components")).await
    }

    /// Issue types with their valid statuses.
    pub async fn find_statuses(&mut self, project: &str) -> Result<Value> {
        self.get(Self::path(project, "statuses")).await
    }

    pub async fn find_versions(&mut self, project: &str) -> Result<Value> {
        self.get(Self::path(project, "versions")).await
    }

    pub async fn find_properties(&mut self, project: &str) -> Result<Value> {
        self.get(Self::path(project, "properties")).await
    }

    pub async fn find_property(&mut self, project: &str, key: &str) -> Result<Value> {
        self.get(Self::path(project, &format!("properties/{}", segment(key))))
            .await
    }

    pub async fn find_roles(&mut self, project: &str) -> Result<Value> {
        self.get(Self::path(project, "role")).await
    }

    pub async fn find_role(&mut self, project: &str, role_id: &str) -> Result<Value> {
        self.get(Self::path(project, &format!("role/{}", segment(role_id))))
            .await
    }

    /// Replaces the role's actors. Exactly one of `user` and `group` is required.
    pub async fn update_role(
        &mut self,
        project: &str,
        role_id: &str,
        user: Option<&str>,
        group: Option<&str>,
    ) -> Result<Value> {
        let params = user_or_group(user, group)?;
        let path = Self::path(project, &format!("role/{}", segment(role_id)));
        self.client
            .call_endpoint(&path, params, HttpMethod::Put)
            .await
    }

    /// Adds an actor to the role. Exactly one of `user` and `group` is required.
    pub async fn add_role(
        &mut self,
        project: &str,
        role_id: &str,
        user: Option<&str>,
        group: Option<&str>,
    ) -> Result<Value> {
        let params = user_or_group(user, group)?;
        let path = Self::path(project, &format!("role/{}", segment(role_id)));
        self.client
            .call_endpoint(&path, params, HttpMethod::Post)
            .await
    }

    pub async fn delete_role(&mut self, project: &str, role_id: &str) -> Result<Value> {
        let path = Self::path(project, &format!("role/{}", segment(role_id)));
        self.client
            .call_endpoint(&path, Params::new(), HttpMethod::Delete)
            .await
    }
}
