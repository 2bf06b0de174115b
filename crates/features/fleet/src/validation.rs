use crate::dto::{LoadRequest, MedicationDto, RegisterDroneRequest};
use dhub_domain::constants::{MAX_BATTERY_CAPACITY, MAX_SERIAL_LENGTH, MAX_WEIGHT_LIMIT};
use dhub_domain::drone::{Drone, Medication};
use dhub_kernel::validation::{Validate, Violations};
use url::Url;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_missing(value: Option<&str>) -> bool {
    value.is_none_or(is_blank)
}

fn is_name(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_code(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn is_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| url.has_host())
}

impl Validate for RegisterDroneRequest {
    fn validate(&self) -> Result<(), Violations> {
        let mut v = Violations::new();

        match self.serial_number.as_deref() {
            None => v.push("serialNumber", "Serial number is mandatory"),
            Some(serial) if is_blank(serial) => v.push("serialNumber", "Serial number is mandatory"),
            Some(serial) if serial.chars().count() > MAX_SERIAL_LENGTH => {
                v.push("serialNumber", "Serial number can have maximum 100 characters");
            },
            Some(_) => {},
        }

        if self.model.is_none() {
            v.push("model", "Model is mandatory");
        }

        match self.weight_limit {
            None => v.push("weightLimit", "Weight limit is mandatory"),
            Some(w) if w < 0 => v.push("weightLimit", "Weight limit can't be negative"),
            Some(w) if w > i32::from(MAX_WEIGHT_LIMIT) => {
                v.push("weightLimit", "Weight limit can't be more than 500 gr");
            },
            Some(_) => {},
        }

        match self.battery_capacity {
            None => v.push("batteryCapacity", "Battery capacity is mandatory"),
            Some(b) if !(0..=i32::from(MAX_BATTERY_CAPACITY)).contains(&b) => {
                v.push("batteryCapacity", "Battery capacity should be in percentage");
            },
            Some(_) => {},
        }

        v.into_result()
    }
}

impl Validate for MedicationDto {
    fn validate(&self) -> Result<(), Violations> {
        let mut v = Violations::new();

        match self.name.as_deref() {
            name if is_missing(name) => v.push("name", "Name is mandatory"),
            Some(name) if !is_name(name) => v.push("name", "Name allows only letters, numbers, '-', '_'"),
            _ => {},
        }

        match self.weight {
            None => v.push("weight", "Weight is mandatory"),
            Some(w) if w < 0 => v.push("weight", "Weight can't be negative"),
            Some(_) => {},
        }

        match self.code.as_deref() {
            code if is_missing(code) => v.push("code", "Code is mandatory"),
            Some(code) if !is_code(code) => {
                v.push("code", "Code allows only upper case letters, underscore and numbers");
            },
            _ => {},
        }

        match self.image.as_deref() {
            image if is_missing(image) => v.push("image", "Image url is mandatory"),
            Some(image) if !is_url(image) => v.push("image", "Image must be a valid URL"),
            _ => {},
        }

        v.into_result()
    }
}

impl Validate for LoadRequest {
    fn validate(&self) -> Result<(), Violations> {
        let mut v = Violations::new();
        for (i, medication) in self.medications.iter().flatten().enumerate() {
            if let Err(nested) = medication.validate() {
                v.extend_nested(&format!("medications[{i}]"), nested);
            }
        }
        v.into_result()
    }
}

impl RegisterDroneRequest {
    /// Validated conversion into a fresh `IDLE` drone.
    ///
    /// # Errors
    ///
    /// Every failing field.
    pub fn into_drone(self) -> Result<Drone, Violations> {
        self.validate()?;
        match (self.serial_number, self.model, self.weight_limit, self.battery_capacity) {
            (Some(serial), Some(model), Some(weight), Some(battery)) => {
                match (u16::try_from(weight), u8::try_from(battery)) {
                    (Ok(weight), Ok(battery)) => Ok(Drone::new(serial, model, weight, battery)),
                    _ => Err(out_of_range()),
                }
            },
            _ => Err(out_of_range()),
        }
    }
}

impl LoadRequest {
    /// Validated conversion into the payload to put on board.
    ///
    /// # Errors
    ///
    /// Every failing medication field.
    pub fn into_medications(self) -> Result<Vec<Medication>, Violations> {
        self.validate()?;
        self.medications
            .unwrap_or_default()
            .into_iter()
            .map(|m| match (m.name, m.weight.map(u32::try_from), m.code, m.image) {
                (Some(name), Some(Ok(weight)), Some(code), Some(image)) => {
                    Ok(Medication { name, weight, code, image })
                },
                _ => Err(out_of_range()),
            })
            .collect()
    }
}

// Unreachable after a passing `validate`, kept so the conversion stays total.
fn out_of_range() -> Violations {
    let mut v = Violations::new();
    v.push("request", "Request fields are out of range");
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use dhub_domain::drone::{Model, State};

    fn medication() -> MedicationDto {
        MedicationDto::new("Name-1", 50, "CODE_01", "http://localhost/image1")
    }

    #[test]
    fn accepts_a_well_formed_registration() {
        let drone = RegisterDroneRequest::new("12345", Model::Lightweight, 200, 55).into_drone().unwrap();
        assert_eq!(drone.state, State::Idle);
        assert_eq!(drone.weight_limit, 200);
        assert_eq!(drone.battery_capacity, 55);
    }

    #[test]
    fn serial_length_is_bounded() {
        let long = "S".repeat(101);
        let err = RegisterDroneRequest::new(long, Model::Heavyweight, 10, 10).validate().unwrap_err();
        assert_eq!(err.to_string(), "serialNumber: Serial number can have maximum 100 characters; ");

        let exact = "S".repeat(100);
        assert!(RegisterDroneRequest::new(exact, Model::Heavyweight, 10, 10).validate().is_ok());
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let err = RegisterDroneRequest::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "serialNumber: Serial number is mandatory; model: Model is mandatory; \
             weightLimit: Weight limit is mandatory; batteryCapacity: Battery capacity is mandatory; "
        );
    }

    #[test]
    fn numeric_bounds_are_inclusive() {
        assert!(RegisterDroneRequest::new("a", Model::Lightweight, 500, 100).validate().is_ok());
        assert!(RegisterDroneRequest::new("a", Model::Lightweight, 0, 0).validate().is_ok());

        let err = RegisterDroneRequest::new("a", Model::Lightweight, 501, 101).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "weightLimit: Weight limit can't be more than 500 gr; \
             batteryCapacity: Battery capacity should be in percentage; "
        );

        let err = RegisterDroneRequest::new("a", Model::Lightweight, -1, -1).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "weightLimit: Weight limit can't be negative; \
             batteryCapacity: Battery capacity should be in percentage; "
        );
    }

    #[test]
    fn medication_rules() {
        assert!(medication().validate().is_ok());

        let bad_name = MedicationDto { name: Some("Name 2".into()), ..medication() };
        assert_eq!(
            bad_name.validate().unwrap_err().to_string(),
            "name: Name allows only letters, numbers, '-', '_'; "
        );

        let bad_code = MedicationDto { code: Some("code_01".into()), ..medication() };
        assert_eq!(
            bad_code.validate().unwrap_err().to_string(),
            "code: Code allows only upper case letters, underscore and numbers; "
        );

        let bad_image = MedicationDto { image: Some("not a url".into()), ..medication() };
        assert_eq!(bad_image.validate().unwrap_err().to_string(), "image: Image must be a valid URL; ");

        let negative = MedicationDto { weight: Some(-1), ..medication() };
        assert_eq!(negative.validate().unwrap_err().to_string(), "weight: Weight can't be negative; ");

        let blank = MedicationDto::default();
        assert_eq!(blank.validate().unwrap_err().len(), 4);
    }

    #[test]
    fn medication_violations_carry_their_index() {
        let request = LoadRequest::new(vec![
            medication(),
            MedicationDto { name: Some("bad name!".into()), ..medication() },
        ]);
        assert_eq!(
            request.into_medications().unwrap_err().to_string(),
            "medications[1].name: Name allows only letters, numbers, '-', '_'; "
        );
    }

    #[test]
    fn empty_load_request_is_structurally_valid() {
        assert!(LoadRequest::default().into_medications().unwrap().is_empty());
        assert!(LoadRequest::new(Vec::new()).into_medications().unwrap().is_empty());
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let blank = MedicationDto { name: Some("  ".into()), code: Some(String::new()), ..medication() };
        assert_eq!(
            blank.validate().unwrap_err().to_string(),
            "name: Name is mandatory; code: Code is mandatory; "
        );
    }

    #[test]
    fn converted_payload_keeps_weights_and_order() {
        let request = LoadRequest::new(vec![
            MedicationDto::new("A", 0, "C1", "http://localhost/a"),
            MedicationDto::new("B", i32::MAX, "C2", "http://localhost/b"),
        ]);
        let medications = request.into_medications().unwrap();
        assert_eq!(medications[0].weight, 0);
        assert_eq!(medications[1].weight, u32::try_from(i32::MAX).unwrap());
        assert_eq!(medications[1].name, "B");
    }
}
