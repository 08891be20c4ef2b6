mod case_dto;

pub use case_dto::{
    AssignInvestigatorDto, CaseDetailDto, CaseQueryParams, CaseSummaryDto, SortDirection,
    StaffMessageDto, SubmissionReceiptDto, SubmitCaseDto, UpdateCaseStatusDto, UpdateNotesDto,
};
