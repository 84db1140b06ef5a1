//! Mapper implementations for converting between DTOs and contract models.

use address_service::contract::{Address, AddressPatch, NewAddress};
use mercato_auth::TokenResponse;
use mercato_query::Page;

use super::dto::*;
use crate::contract::{Account, AccountPatch, NewAccount};

// ===== Account conversions =====

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            nickname: account.nickname,
            document_number: account.document_number,
            phones: account.phones,
            avatar: account.avatar,
            birthdate: account.birthdate,
            is_admin: account.is_admin,
            is_celebrity: account.is_celebrity,
            accept_legal_term: account.accept_legal_term,
            email_verified_at: account.email_verified_at,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

impl From<RegisterAccountRequest> for NewAccount {
    fn from(req: RegisterAccountRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            nickname: req.nickname,
            document_number: req.document_number,
            password: req.password,
            phones: req.phones,
            avatar: req.avatar,
            external_data: req.external_data,
            birthdate: req.birthdate,
            is_celebrity: req.is_celebrity,
            accept_legal_term: req.accept_legal_term,
            addresses: req.addresses.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<UpdateAccountRequest> for AccountPatch {
    fn from(req: UpdateAccountRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            nickname: req.nickname,
            document_number: req.document_number,
            password: req.password,
            phones: req.phones,
            avatar: req.avatar,
            external_data: req.external_data,
            birthdate: req.birthdate,
            is_celebrity: req.is_celebrity,
            accept_legal_term: req.accept_legal_term,
        }
    }
}

// ===== Auth conversions =====

impl From<TokenResponse> for TokenDto {
    fn from(token: TokenResponse) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
        }
    }
}

// ===== Address conversions =====

impl From<Address> for AddressDto {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            name: address.name,
            is_default: address.is_default,
            street: address.street,
            neighborhood: address.neighborhood,
            city: address.city,
            postcode: address.postcode,
            state: address.state,
            number: address.number,
            complement: address.complement,
            lat: address.lat,
            lng: address.lng,
            created_at: address.created_at,
            updated_at: address.updated_at,
        }
    }
}

impl From<AddressCreateDto> for NewAddress {
    fn from(dto: AddressCreateDto) -> Self {
        Self {
            name: dto.name,
            is_default: dto.is_default,
            street: dto.street,
            neighborhood: dto.neighborhood,
            city: dto.city,
            postcode: dto.postcode,
            state: dto.state,
            number: dto.number,
            complement: dto.complement,
            lat: dto.lat,
            lng: dto.lng,
        }
    }
}

impl From<AddressUpdateDto> for AddressPatch {
    fn from(dto: AddressUpdateDto) -> Self {
        Self {
            name: dto.name,
            is_default: dto.is_default,
            street: dto.street,
            neighborhood: dto.neighborhood,
            city: dto.city,
            postcode: dto.postcode,
            state: dto.state,
            number: dto.number,
            complement: dto.complement,
            lat: dto.lat,
            lng: dto.lng,
        }
    }
}

impl From<Page<Address>> for AddressPageDto {
    fn from(page: Page<Address>) -> Self {
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            per_page: page.per_page,
            num_pages: page.num_pages,
            page: page.page,
            total: page.total,
        }
    }
}
