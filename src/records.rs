/*!
 * eID records
 * Fixed-layout structures filled in by the driver. Every text field is a
 * fixed-capacity buffer followed by the number of bytes the driver wrote.
 */

use std::os::raw::c_int;

/// One text field of a raw record, as the driver left it.
#[derive(Debug, Clone, Copy)]
pub struct RawField<'a> {
    /// JSON key of the field; the size key is this name with a `Size` suffix.
    pub name: &'static str,
    pub buffer: &'a [u8],
    pub declared_size: c_int,
}

/// A record populated by one driver call.
pub trait Record {
    /// Record name used in logs and errors.
    const KIND: &'static str;

    fn fields(&self) -> Vec<RawField<'_>>;
}

macro_rules! eid_record {
    (
        $(#[$meta:meta])*
        $record:ident ($kind:literal) {
            $( $field:ident, $size:ident : $cap:ident = $len:literal => $key:literal; )+
        }
    ) => {
        $( pub const $cap: usize = $len; )+

        $(#[$meta])*
        #[repr(C)]
        #[derive(Debug, Clone)]
        pub struct $record {
            $(
                pub $field: [u8; $cap],
                pub $size: c_int,
            )+
        }

        impl $record {
            /// Zero-filled record, ready to be passed to the driver.
            pub fn new() -> Self {
                Self {
                    $(
                        $field: [0; $cap],
                        $size: 0,
                    )+
                }
            }
        }

        impl Default for $record {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Record for $record {
            const KIND: &'static str = $kind;

            fn fields(&self) -> Vec<RawField<'_>> {
                vec![
                    $(
                        RawField {
                            name: $key,
                            buffer: &self.$field,
                            declared_size: self.$size,
                        },
                    )+
                ]
            }
        }
    };
}

eid_record! {
    /// `EID_DOCUMENT_DATA`
    DocumentData ("documentData") {
        doc_reg_no, doc_reg_no_size: MAX_DOC_REG_NO = 9 => "docRegNo";
        document_type, document_type_size: MAX_DOCUMENT_TYPE = 2 => "documentType";
        issuing_date, issuing_date_size: MAX_ISSUING_DATE = 10 => "issuingDate";
        expiry_date, expiry_date_size: MAX_EXPIRY_DATE = 10 => "expiryDate";
        issuing_authority, issuing_authority_size: MAX_ISSUING_AUTHORITY = 100 => "issuingAuthority";
        document_serial_number, document_serial_number_size: MAX_DOCUMENT_SERIAL_NUMBER = 10 => "documentSerialNumber";
        chip_serial_number, chip_serial_number_size: MAX_CHIP_SERIAL_NUMBER = 14 => "chipSerialNumber";
    }
}

eid_record! {
    /// `EID_FIXED_PERSONAL_DATA`
    FixedPersonalData ("fixedPersonalData") {
        personal_number, personal_number_size: MAX_PERSONAL_NUMBER = 13 => "personalNumber";
        surname, surname_size: MAX_SURNAME = 200 => "surname";
        given_name, given_name_size: MAX_GIVEN_NAME = 200 => "givenName";
        parent_given_name, parent_given_name_size: MAX_PARENT_GIVEN_NAME = 200 => "parentGivenName";
        sex, sex_size: MAX_SEX = 2 => "sex";
        place_of_birth, place_of_birth_size: MAX_PLACE_OF_BIRTH = 200 => "placeOfBirth";
        state_of_birth, state_of_birth_size: MAX_STATE_OF_BIRTH = 200 => "stateOfBirth";
        date_of_birth, date_of_birth_size: MAX_DATE_OF_BIRTH = 10 => "dateOfBirth";
        community_of_birth, community_of_birth_size: MAX_COMMUNITY_OF_BIRTH = 200 => "communityOfBirth";
        status_of_foreigner, status_of_foreigner_size: MAX_STATUS_OF_FOREIGNER = 200 => "statusOfForeigner";
        nationality_full, nationality_full_size: MAX_NATIONALITY_FULL = 200 => "nationalityFull";
    }
}

eid_record! {
    /// `EID_VARIABLE_PERSONAL_DATA`
    VariablePersonalData ("variablePersonalData") {
        state, state_size: MAX_STATE = 100 => "state";
        community, community_size: MAX_COMMUNITY = 200 => "community";
        place, place_size: MAX_PLACE = 200 => "place";
        street, street_size: MAX_STREET = 200 => "street";
        house_number, house_number_size: MAX_HOUSE_NUMBER = 20 => "houseNumber";
        house_letter, house_letter_size: MAX_HOUSE_LETTER = 8 => "houseLetter";
        entrance, entrance_size: MAX_ENTRANCE = 10 => "entrance";
        floor, floor_size: MAX_FLOOR = 6 => "floor";
        apartment_number, apartment_number_size: MAX_APARTMENT_NUMBER = 12 => "apartmentNumber";
        address_date, address_date_size: MAX_ADDRESS_DATE = 10 => "addressDate";
        address_label, address_label_size: MAX_ADDRESS_LABEL = 60 => "addressLabel";
    }
}

/// Copies `value` into `buffer` and returns the length to declare for it.
///
/// Used by fakes to populate records the way the driver does.
#[cfg(test)]
pub(crate) fn fill(buffer: &mut [u8], value: &[u8]) -> c_int {
    buffer[..value.len()].copy_from_slice(value);
    value.len() as c_int
}
