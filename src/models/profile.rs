use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Perfil del usuario con los datos de su empresa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub description: String,
    pub profile_photo: String,
    pub company_info: CompanyInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub company_name: String,
    pub company_description: String,
    pub company_location: String,
    pub company_phone: String,
    pub company_contact: String,
    pub company_photo: String,
}

pub const DEFAULT_PROFILE_PHOTO: &str = "/default-user.png";
pub const DEFAULT_COMPANY_PHOTO: &str = "/default-company.png";

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Juan Pérez".to_string(),
            email: "juan.perez@example.com".to_string(),
            phone: "123456789".to_string(),
            description: "Este es un perfil de prueba.".to_string(),
            profile_photo: DEFAULT_PROFILE_PHOTO.to_string(),
            company_info: CompanyInfo {
                company_name: "Empresa Demo".to_string(),
                company_description: "Descripción de la empresa demo.".to_string(),
                company_location: "Ciudad, País".to_string(),
                company_phone: "987654321".to_string(),
                company_contact: "contacto@empresa.com".to_string(),
                company_photo: DEFAULT_COMPANY_PHOTO.to_string(),
            },
        }
    }
}

impl UserProfile {
    /// Sets one field by its form name, e.g. `phone` or
    /// `companyInfo.companyName`.
    pub fn set_field(&mut self, path: &str, value: String) -> Result<(), AppError> {
        let slot = match path.split_once('.') {
            None => match path {
                "name" => &mut self.name,
                "email" => &mut self.email,
                "phone" => &mut self.phone,
                "description" => &mut self.description,
                "profilePhoto" => &mut self.profile_photo,
                _ => return Err(unknown_field(path)),
            },
            Some(("companyInfo", field)) => match field {
                "companyName" => &mut self.company_info.company_name,
                "companyDescription" => &mut self.company_info.company_description,
                "companyLocation" => &mut self.company_info.company_location,
                "companyPhone" => &mut self.company_info.company_phone,
                "companyContact" => &mut self.company_info.company_contact,
                "companyPhoto" => &mut self.company_info.company_photo,
                _ => return Err(unknown_field(path)),
            },
            Some(_) => return Err(unknown_field(path)),
        };
        *slot = value;
        Ok(())
    }
}

fn unknown_field(path: &str) -> AppError {
    AppError::Validation(format!("Campo de perfil desconocido: {}", path))
}
